// src/services/notification_service.rs

use chrono::NaiveDate;

use crate::{
    clients::PushClient, common::error::AppError, db::ContractRepository,
    db::contract_repo::OverdueInstallment,
};

// Varredura de inadimplência: percorre as parcelas vencidas do mês e avisa
// cada locador pelo push do aplicativo. Semântica de lembrete, ao menos uma
// vez: rodar de novo no mesmo dia reenvia os avisos.
#[derive(Clone)]
pub struct NotificationService {
    contract_repo: ContractRepository,
    push_client: PushClient,
}

impl NotificationService {
    pub fn new(contract_repo: ContractRepository, push_client: PushClient) -> Self {
        Self {
            contract_repo,
            push_client,
        }
    }

    // Devolve quantos envios foram tentados. Falha de envio individual é
    // logada e não aborta o restante da varredura.
    pub async fn overdue_scan(&self, today: NaiveDate) -> Result<usize, AppError> {
        let overdue = self.contract_repo.list_overdue_installments(today).await?;
        tracing::info!("🔔 Varredura de inadimplência: {} parcela(s) vencida(s)", overdue.len());

        let mut attempted = 0;
        for installment in &overdue {
            let Some(push_token) = installment.push_token.as_deref() else {
                tracing::debug!(
                    "Locador {} sem push token cadastrado, aviso pulado",
                    installment.owner_id
                );
                continue;
            };

            attempted += 1;
            let (title, body) = overdue_message(installment);
            if let Err(e) = self.push_client.send(push_token, &title, &body).await {
                tracing::warn!(
                    "Falha ao notificar o locador {} sobre a parcela {}: {}",
                    installment.owner_id,
                    installment.installment_id,
                    e
                );
            }
        }

        Ok(attempted)
    }
}

fn overdue_message(installment: &OverdueInstallment) -> (String, String) {
    (
        "Aluguel em atraso".to_string(),
        format!(
            "A parcela de R$ {:.2} de {} ({}), vencida em {}, ainda não foi paga.",
            installment.value,
            installment.tenant_name,
            installment.house_nickname,
            installment.due_date.format("%d/%m/%Y"),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn mensagem_cita_inquilino_casa_e_vencimento() {
        let installment = OverdueInstallment {
            installment_id: 7,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            value: dec!(1000.00),
            tenant_name: "Maria Pereira".to_string(),
            house_nickname: "Casa 03".to_string(),
            owner_id: Uuid::new_v4(),
            push_token: Some("ExponentPushToken[abc]".to_string()),
        };

        let (title, body) = overdue_message(&installment);
        assert_eq!(title, "Aluguel em atraso");
        assert!(body.contains("Maria Pereira"));
        assert!(body.contains("Casa 03"));
        assert!(body.contains("10/03/2024"));
        assert!(body.contains("R$ 1000.00"));
    }
}
