//! Prospecção por IA.
//!
//! Pergunta em linguagem natural contra o endpoint de prospecção. O mesmo
//! esquema de sequência da busca protege contra respostas atrasadas.

use crate::types::ProspectingAnswer;

/// Requisição de prospecção emitida pela página.
#[derive(Debug, Clone)]
pub struct ProspectingRequest {
    /// Número de sequência desta requisição
    pub seq: u64,
    /// Pergunta transmitida
    pub pergunta: String,
}

/// Estado da página de prospecção.
#[derive(Debug, Clone)]
pub enum ProspectingState {
    /// Nenhuma pergunta feita ainda
    Idle,
    /// Aguardando resposta
    Loading,
    /// Resposta recebida
    Answered(ProspectingAnswer),
    /// Falha (mensagem exibida ao usuário)
    Failed(String),
}

/// Página de prospecção por IA.
#[derive(Debug)]
pub struct ProspectingPage {
    /// Texto digitado no campo de pergunta
    pub pergunta: String,
    /// Estado corrente
    pub state: ProspectingState,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl Default for ProspectingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProspectingPage {
    /// Página pristina.
    pub fn new() -> Self {
        Self {
            pergunta: String::new(),
            state: ProspectingState::Idle,
            next_seq: 0,
            latest_seq: None,
        }
    }

    /// Submete a pergunta digitada; vazia (após trim) é no-op.
    pub fn submit(&mut self) -> Option<ProspectingRequest> {
        let pergunta = self.pergunta.trim();
        if pergunta.is_empty() {
            return None;
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = Some(seq);
        self.state = ProspectingState::Loading;
        Some(ProspectingRequest {
            seq,
            pergunta: pergunta.to_string(),
        })
    }

    /// Recebe a resposta; respostas obsoletas são descartadas.
    pub fn on_answer(&mut self, seq: u64, answer: ProspectingAnswer) {
        if self.latest_seq != Some(seq) {
            return;
        }
        self.state = ProspectingState::Answered(answer);
    }

    /// Recebe a falha; a mensagem é exibida como chegou do cliente da API.
    pub fn on_error(&mut self, seq: u64, message: String) {
        if self.latest_seq != Some(seq) {
            return;
        }
        log::error!("Erro na prospecção: {}", message);
        self.state = ProspectingState::Failed(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pergunta_vazia_e_noop() {
        let mut page = ProspectingPage::new();
        page.pergunta = "  ".into();
        assert!(page.submit().is_none());
        assert!(matches!(page.state, ProspectingState::Idle));
    }

    #[test]
    fn test_fluxo_de_resposta() {
        let mut page = ProspectingPage::new();
        page.pergunta = "padarias ativas em SP".into();

        let req = page.submit().unwrap();
        assert_eq!(req.pergunta, "padarias ativas em SP");
        assert!(matches!(page.state, ProspectingState::Loading));

        page.on_answer(
            req.seq,
            ProspectingAnswer {
                resposta: "Encontrei 12 padarias.".into(),
                ..Default::default()
            },
        );
        match &page.state {
            ProspectingState::Answered(answer) => {
                assert_eq!(answer.resposta, "Encontrei 12 padarias.")
            }
            other => panic!("estado inesperado: {:?}", other),
        }
    }

    #[test]
    fn test_resposta_obsoleta_descartada() {
        let mut page = ProspectingPage::new();
        page.pergunta = "primeira".into();
        let antiga = page.submit().unwrap();

        page.pergunta = "segunda".into();
        let nova = page.submit().unwrap();

        page.on_answer(
            antiga.seq,
            ProspectingAnswer {
                resposta: "obsoleta".into(),
                ..Default::default()
            },
        );
        assert!(matches!(page.state, ProspectingState::Loading));

        page.on_error(nova.seq, "Erro na API (502)".into());
        assert!(matches!(page.state, ProspectingState::Failed(_)));
    }
}
