// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// MODELO DE FILTROS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//
// Objeto-valor com os critérios opcionais da busca avançada e a serialização
// explícita de cada campo reconhecido para a query string. Campos ausentes,
// vazios ou "todas" não são transmitidos.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use std::fmt;

/// Filtro de situação cadastral (tri-state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Todas as situações (não transmitido)
    #[default]
    Todas,
    /// Somente ativas
    Ativa,
    /// Somente inativas/baixadas
    Inativa,
}

impl StatusFilter {
    /// Converte texto do usuário em filtro de situação.
    ///
    /// Case-insensitive: "ativa"/"true" → `Ativa`, "inativa"/"false" →
    /// `Inativa`, qualquer outro valor → `Todas`.
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().trim() {
            "ativa" | "true" => Self::Ativa,
            "inativa" | "false" => Self::Inativa,
            _ => Self::Todas,
        }
    }

    /// Valor do parâmetro de query, ou `None` quando o filtro é "todas".
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            Self::Todas => None,
            Self::Ativa => Some("true"),
            Self::Inativa => Some("false"),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Todas => "Todas",
            Self::Ativa => "Ativa",
            Self::Inativa => "Inativa",
        };
        write!(f, "{}", label)
    }
}

/// Campos reconhecidos do formulário de filtros avançados.
///
/// A enumeração é a configuração explícita da serialização: cada campo tem
/// um nome de parâmetro fixo e uma regra de conversão em
/// [`SearchFilters::set_field`]. Chaves desconhecidas não existem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Razão social ou nome fantasia
    RazaoSocial,
    /// Atividade principal (CNAE)
    CnaePrincipal,
    /// Natureza jurídica
    NaturezaJuridica,
    /// Situação cadastral
    Status,
    /// Unidade federativa
    Uf,
    /// Município
    Municipio,
    /// Bairro
    Bairro,
    /// CEP
    Cep,
    /// DDD do telefone
    Ddd,
    /// Data de abertura mínima
    DataAberturaMin,
    /// Data de abertura máxima
    DataAberturaMax,
    /// Capital social mínimo
    CapitalSocialMin,
    /// Capital social máximo
    CapitalSocialMax,
}

impl FilterField {
    /// Todos os campos, na ordem de exibição do formulário.
    pub const ALL: [FilterField; 13] = [
        FilterField::RazaoSocial,
        FilterField::CnaePrincipal,
        FilterField::NaturezaJuridica,
        FilterField::Status,
        FilterField::Uf,
        FilterField::Municipio,
        FilterField::Bairro,
        FilterField::Cep,
        FilterField::Ddd,
        FilterField::DataAberturaMin,
        FilterField::DataAberturaMax,
        FilterField::CapitalSocialMin,
        FilterField::CapitalSocialMax,
    ];

    /// Rótulo de exibição do campo.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RazaoSocial => "Razão Social / Fantasia",
            Self::CnaePrincipal => "CNAE Principal",
            Self::NaturezaJuridica => "Natureza Jurídica",
            Self::Status => "Situação (ativa/inativa)",
            Self::Uf => "UF",
            Self::Municipio => "Município",
            Self::Bairro => "Bairro",
            Self::Cep => "CEP",
            Self::Ddd => "DDD",
            Self::DataAberturaMin => "Abertura a partir de",
            Self::DataAberturaMax => "Abertura até",
            Self::CapitalSocialMin => "Capital mínimo",
            Self::CapitalSocialMax => "Capital máximo",
        }
    }

    /// Nome do parâmetro na query string.
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::RazaoSocial => "razao_social",
            Self::CnaePrincipal => "cnae_principal",
            Self::NaturezaJuridica => "natureza_juridica",
            Self::Status => "status_ativa",
            Self::Uf => "uf",
            Self::Municipio => "municipio",
            Self::Bairro => "bairro",
            Self::Cep => "cep",
            Self::Ddd => "ddd",
            Self::DataAberturaMin => "data_abertura_min",
            Self::DataAberturaMax => "data_abertura_max",
            Self::CapitalSocialMin => "capital_social_min",
            Self::CapitalSocialMax => "capital_social_max",
        }
    }
}

/// Conjunto de critérios opcionais da busca avançada.
///
/// Objeto-valor puro: reconstruído a cada sessão do formulário e substituído
/// por inteiro em cada "aplicar"/"limpar"; nunca mutado por fora dos métodos
/// nomeados.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    /// Razão social ou nome fantasia
    pub razao_social: Option<String>,
    /// Atividade principal (CNAE)
    pub cnae_principal: Option<String>,
    /// Natureza jurídica
    pub natureza_juridica: Option<String>,
    /// Situação cadastral
    pub status: StatusFilter,
    /// Unidade federativa
    pub uf: Option<String>,
    /// Município
    pub municipio: Option<String>,
    /// Bairro
    pub bairro: Option<String>,
    /// CEP
    pub cep: Option<String>,
    /// DDD do telefone
    pub ddd: Option<String>,
    /// Data de abertura mínima (ISO 8601)
    pub data_abertura_min: Option<String>,
    /// Data de abertura máxima (ISO 8601)
    pub data_abertura_max: Option<String>,
    /// Capital social mínimo
    pub capital_social_min: Option<f64>,
    /// Capital social máximo
    pub capital_social_max: Option<f64>,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SearchFilters {
    /// Conjunto vazio (nenhum critério).
    pub fn new() -> Self {
        Self::default()
    }

    /// Se nenhum critério está definido.
    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }

    /// Define um campo a partir do texto cru digitado no formulário.
    ///
    /// Texto vazio limpa o campo; capital que não parseia como número também
    /// limpa (o formulário não transmite valores inválidos).
    pub fn set_field(&mut self, field: FilterField, raw: &str) {
        match field {
            FilterField::RazaoSocial => self.razao_social = non_empty(raw),
            FilterField::CnaePrincipal => self.cnae_principal = non_empty(raw),
            FilterField::NaturezaJuridica => self.natureza_juridica = non_empty(raw),
            FilterField::Status => self.status = StatusFilter::parse(raw),
            FilterField::Uf => self.uf = non_empty(raw).map(|v| v.to_uppercase()),
            FilterField::Municipio => self.municipio = non_empty(raw),
            FilterField::Bairro => self.bairro = non_empty(raw),
            FilterField::Cep => self.cep = non_empty(raw),
            FilterField::Ddd => self.ddd = non_empty(raw),
            FilterField::DataAberturaMin => self.data_abertura_min = non_empty(raw),
            FilterField::DataAberturaMax => self.data_abertura_max = non_empty(raw),
            FilterField::CapitalSocialMin => {
                self.capital_social_min = raw.trim().parse().ok();
            }
            FilterField::CapitalSocialMax => {
                self.capital_social_max = raw.trim().parse().ok();
            }
        }
    }

    /// Serializa os critérios definidos em pares (parâmetro, valor).
    ///
    /// Enumeração explícita campo a campo: só os campos reconhecidos chegam
    /// à query string, e valores ausentes/vazios/"todas" são omitidos.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let text_fields = [
            (FilterField::RazaoSocial, &self.razao_social),
            (FilterField::CnaePrincipal, &self.cnae_principal),
            (FilterField::NaturezaJuridica, &self.natureza_juridica),
            (FilterField::Uf, &self.uf),
            (FilterField::Municipio, &self.municipio),
            (FilterField::Bairro, &self.bairro),
            (FilterField::Cep, &self.cep),
            (FilterField::Ddd, &self.ddd),
            (FilterField::DataAberturaMin, &self.data_abertura_min),
            (FilterField::DataAberturaMax, &self.data_abertura_max),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value.as_deref() {
                if !value.trim().is_empty() {
                    pairs.push((field.param_name(), value.trim().to_string()));
                }
            }
        }

        if let Some(status) = self.status.as_param() {
            pairs.push((FilterField::Status.param_name(), status.to_string()));
        }

        if let Some(min) = self.capital_social_min {
            pairs.push((FilterField::CapitalSocialMin.param_name(), min.to_string()));
        }
        if let Some(max) = self.capital_social_max {
            pairs.push((FilterField::CapitalSocialMax.param_name(), max.to_string()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conjunto_vazio_nao_transmite_nada() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
        assert!(filters.to_query_pairs().is_empty());
    }

    #[test]
    fn test_status_todas_e_omitido() {
        let mut filters = SearchFilters::new();
        filters.status = StatusFilter::Todas;
        assert!(filters.to_query_pairs().is_empty());

        filters.status = StatusFilter::Ativa;
        assert_eq!(
            filters.to_query_pairs(),
            vec![("status_ativa", "true".to_string())]
        );

        filters.status = StatusFilter::Inativa;
        assert_eq!(
            filters.to_query_pairs(),
            vec![("status_ativa", "false".to_string())]
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(StatusFilter::parse("ATIVA"), StatusFilter::Ativa);
        assert_eq!(StatusFilter::parse("true"), StatusFilter::Ativa);
        assert_eq!(StatusFilter::parse("false"), StatusFilter::Inativa);
        assert_eq!(StatusFilter::parse("all"), StatusFilter::Todas);
        assert_eq!(StatusFilter::parse(""), StatusFilter::Todas);
    }

    #[test]
    fn test_campos_vazios_sao_omitidos() {
        let mut filters = SearchFilters::new();
        filters.set_field(FilterField::Municipio, "   ");
        filters.set_field(FilterField::Uf, "sp");
        filters.set_field(FilterField::CapitalSocialMin, "abc");

        let pairs = filters.to_query_pairs();
        assert_eq!(pairs, vec![("uf", "SP".to_string())]);
    }

    #[test]
    fn test_serializacao_completa() {
        let mut filters = SearchFilters::new();
        filters.set_field(FilterField::RazaoSocial, "Padaria");
        filters.set_field(FilterField::Status, "ativa");
        filters.set_field(FilterField::Uf, "SP");
        filters.set_field(FilterField::CapitalSocialMin, "1000");
        filters.set_field(FilterField::CapitalSocialMax, "50000.5");
        filters.set_field(FilterField::DataAberturaMin, "2020-01-01");

        let pairs = filters.to_query_pairs();
        assert!(pairs.contains(&("razao_social", "Padaria".to_string())));
        assert!(pairs.contains(&("status_ativa", "true".to_string())));
        assert!(pairs.contains(&("uf", "SP".to_string())));
        assert!(pairs.contains(&("capital_social_min", "1000".to_string())));
        assert!(pairs.contains(&("capital_social_max", "50000.5".to_string())));
        assert!(pairs.contains(&("data_abertura_min", "2020-01-01".to_string())));
    }

    #[test]
    fn test_substituicao_por_inteiro() {
        let mut filters = SearchFilters::new();
        filters.set_field(FilterField::Uf, "RJ");

        // "Limpar" é substituir o objeto inteiro, não zerar campo a campo
        filters = SearchFilters::new();
        assert!(filters.is_empty());
    }
}
