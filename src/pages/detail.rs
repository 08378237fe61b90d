//! Visão de detalhe de uma empresa.
//!
//! Ao entrar com um CNPJ a página dispara uma única busca de empresa +
//! sócios. Falha leva ao estado terminal `NotFound` com o caminho de volta
//! para a busca; não há retry.

use crate::api::ApiError;
use crate::types::{Empresa, EmpresaDetail, Socio};

/// Estado da visão de detalhe.
#[derive(Debug, Clone)]
pub enum DetailState {
    /// Buscando empresa + sócios
    Loading,
    /// Empresa carregada
    Loaded {
        /// A empresa consultada
        empresa: Empresa,
        /// Quadro societário
        socios: Vec<Socio>,
    },
    /// Empresa não encontrada (estado terminal)
    NotFound,
}

/// Página de detalhe de uma empresa.
#[derive(Debug)]
pub struct DetailPage {
    /// CNPJ cru consultado
    pub cnpj: String,
    /// Estado corrente
    pub state: DetailState,
}

impl DetailPage {
    /// Entra na página para o CNPJ dado; a busca deve ser disparada em
    /// seguida pelo chamador.
    pub fn new(cnpj: impl Into<String>) -> Self {
        Self {
            cnpj: cnpj.into(),
            state: DetailState::Loading,
        }
    }

    /// Recebe a resposta do endpoint de detalhe.
    pub fn on_response(&mut self, detail: EmpresaDetail) {
        self.state = DetailState::Loaded {
            empresa: detail.empresa,
            socios: detail.socios,
        };
    }

    /// Recebe a falha da busca: estado terminal "não encontrada".
    pub fn on_error(&mut self, err: &ApiError) {
        log::error!("Erro ao buscar empresa {}: {}", self.cnpj, err);
        self.state = DetailState::NotFound;
    }

    /// A empresa carregada, se houver.
    pub fn empresa(&self) -> Option<&Empresa> {
        match &self.state {
            DetailState::Loaded { empresa, .. } => Some(empresa),
            _ => None,
        }
    }

    /// Os sócios carregados ([] fora do estado `Loaded`).
    pub fn socios(&self) -> &[Socio] {
        match &self.state {
            DetailState::Loaded { socios, .. } => socios,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluxo_carregado() {
        let mut page = DetailPage::new("12345678000195");
        assert!(matches!(page.state, DetailState::Loading));
        assert!(page.empresa().is_none());

        page.on_response(EmpresaDetail {
            empresa: Empresa {
                cnpj: "12345678000195".into(),
                razao_social: "Padaria LTDA".into(),
                ..Default::default()
            },
            socios: vec![Socio {
                nome_socio: "Maria Silva".into(),
                ..Default::default()
            }],
        });

        assert_eq!(page.empresa().unwrap().razao_social, "Padaria LTDA");
        assert_eq!(page.socios().len(), 1);
    }

    #[test]
    fn test_falha_vira_not_found_terminal() {
        let mut page = DetailPage::new("00000000000000");
        page.on_error(&ApiError::NotFound);
        assert!(matches!(page.state, DetailState::NotFound));
        assert!(page.empresa().is_none());
        assert!(page.socios().is_empty());
    }
}
