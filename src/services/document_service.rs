// src/services/document_service.rs

use chrono::Datelike;
use genpdf::{elements, style, Alignment, Element};
use uuid::Uuid;

use crate::{
    clients::{storage::UploadKind, StorageClient},
    common::error::AppError,
    db::{
        ContractRepository, DashboardRepository, OwnerRepository, PropertyRepository,
        TemplateRepository, TenantRepository,
    },
    models::contract::{
        Contract, ContractBundle, ContractKind, Inspection, InspectionForm, WarrantyKind,
    },
};

// Montador de documentos: resolve o grafo do contrato dentro do escopo do
// locador, interpola os dados no texto legal e delega a renderização ao
// motor de layout. Os bytes sobem para o storage quando o documento fica
// vinculado a um registro (vistoria, PDFs assinados).
#[derive(Clone)]
pub struct DocumentService {
    contract_repo: ContractRepository,
    tenant_repo: TenantRepository,
    property_repo: PropertyRepository,
    template_repo: TemplateRepository,
    owner_repo: OwnerRepository,
    dashboard_repo: DashboardRepository,
    storage: StorageClient,
    fonts_dir: String,
}

impl DocumentService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        contract_repo: ContractRepository,
        tenant_repo: TenantRepository,
        property_repo: PropertyRepository,
        template_repo: TemplateRepository,
        owner_repo: OwnerRepository,
        dashboard_repo: DashboardRepository,
        storage: StorageClient,
        fonts_dir: String,
    ) -> Self {
        Self {
            contract_repo,
            tenant_repo,
            property_repo,
            template_repo,
            owner_repo,
            dashboard_repo,
            storage,
            fonts_dir,
        }
    }

    // Resolve contrato + template + inquilino + casa + propriedade + locador
    // (+ fiador quando a garantia exige). Entidade referenciada que não se
    // resolve no escopo do locador vira ContractIncomplete.
    pub async fn load_bundle(
        &self,
        owner_id: Uuid,
        contract_id: i32,
    ) -> Result<ContractBundle, AppError> {
        let contract = self.contract_repo.find_scoped(owner_id, contract_id).await?;

        let template = self
            .template_repo
            .find_scoped(owner_id, contract.template_id)
            .await
            .map_err(|_| AppError::ContractIncomplete("template não encontrado"))?;

        let tenant = self
            .tenant_repo
            .find_tenant_scoped(owner_id, contract.tenant_id)
            .await
            .map_err(|_| AppError::ContractIncomplete("inquilino não encontrado"))?;

        let house = self
            .property_repo
            .find_house_scoped(owner_id, contract.house_id)
            .await
            .map_err(|_| AppError::ContractIncomplete("casa não encontrada"))?;

        let property = self
            .property_repo
            .find_property_scoped(owner_id, house.property_id)
            .await
            .map_err(|_| AppError::ContractIncomplete("propriedade não encontrada"))?;

        let owner = self
            .owner_repo
            .find_by_id(owner_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let guarantor = self.tenant_repo.find_guarantor_by_tenant(tenant.id).await?;
        if template.warranty == WarrantyKind::Guarantor && guarantor.is_none() {
            return Err(AppError::ContractIncomplete(
                "o template exige fiador e o inquilino não tem um cadastrado",
            ));
        }

        Ok(ContractBundle {
            contract,
            template,
            tenant,
            house,
            property,
            owner,
            guarantor,
        })
    }

    // GET /contracts/{id}/pdf — renderiza e devolve os bytes direto,
    // sem persistir nada.
    pub async fn contract_pdf(
        &self,
        owner_id: Uuid,
        contract_id: i32,
    ) -> Result<Vec<u8>, AppError> {
        let bundle = self.load_bundle(owner_id, contract_id).await?;
        let paragraphs = contract_paragraphs(&bundle)?;

        let mut doc = self.new_document(format!("Contrato de Locação #{}", bundle.contract.id))?;

        doc.push(
            elements::Paragraph::new(contract_title(bundle.template.kind))
                .aligned(Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Break::new(1.5));

        for text in paragraphs {
            doc.push(elements::Paragraph::new(text));
            doc.push(elements::Break::new(0.8));
        }

        push_signature_block(&mut doc, bundle.guarantor.is_some());
        render(doc)
    }

    // Cria (ou substitui) a vistoria do contrato: renderiza o laudo, sobe o
    // PDF e grava via upsert chaveado pelo contrato.
    pub async fn create_inspection(
        &self,
        owner_id: Uuid,
        contract_id: i32,
        form: &InspectionForm,
        photos: &[Vec<u8>],
    ) -> Result<Inspection, AppError> {
        let bundle = self.load_bundle(owner_id, contract_id).await?;
        let pdf = self.render_inspection_pdf(&bundle, form, photos)?;
        let url = self.storage.upload(pdf, UploadKind::Pdf).await?;

        let inspection = self
            .contract_repo
            .upsert_inspection(contract_id, &url, form.inspection_date)
            .await?;
        tracing::info!("✅ Laudo de vistoria gerado para o contrato {}", contract_id);
        Ok(inspection)
    }

    pub async fn submit_signed_contract(
        &self,
        owner_id: Uuid,
        contract_id: i32,
        pdf: Vec<u8>,
    ) -> Result<Contract, AppError> {
        let contract = self.contract_repo.find_scoped(owner_id, contract_id).await?;
        let url = self.storage.upload(pdf, UploadKind::Pdf).await?;
        self.contract_repo.set_signed_pdf(contract.id, &url).await
    }

    pub async fn submit_signed_inspection(
        &self,
        owner_id: Uuid,
        inspection_id: i32,
        pdf: Vec<u8>,
    ) -> Result<Inspection, AppError> {
        let inspection = self
            .contract_repo
            .find_inspection_scoped(owner_id, inspection_id)
            .await?;
        let url = self.storage.upload(pdf, UploadKind::Pdf).await?;
        self.contract_repo
            .set_inspection_signed_pdf(inspection.id, &url)
            .await
    }

    fn render_inspection_pdf(
        &self,
        bundle: &ContractBundle,
        form: &InspectionForm,
        photos: &[Vec<u8>],
    ) -> Result<Vec<u8>, AppError> {
        let mut doc = self.new_document(format!(
            "Termo de Vistoria - Contrato #{}",
            bundle.contract.id
        ))?;

        doc.push(
            elements::Paragraph::new("TERMO DE VISTORIA INICIAL DO IMÓVEL")
                .aligned(Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(
            elements::Paragraph::new("CONTRATO DE LOCAÇÃO")
                .aligned(Alignment::Center)
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Break::new(1.5));

        for text in inspection_header_paragraphs(bundle) {
            doc.push(elements::Paragraph::new(text));
            doc.push(elements::Break::new(0.8));
        }

        doc.push(elements::Paragraph::new(
            "O imóvel está inspecionado conforme os itens abaixo:",
        ));
        doc.push(elements::Break::new(1.0));

        for section in inspection_sections(form) {
            doc.push(elements::Paragraph::new(section));
            doc.push(elements::Break::new(0.5));
        }

        doc.push(elements::Break::new(1.0));
        doc.push(elements::Paragraph::new(format!(
            "Qualquer impugnação ao presente laudo deverá ser comunicada ao LOCADOR por \
             escrito, dentro de 07 (sete) dias a contar da data da assinatura deste, \
             destinada ao e-mail {}. A falta de comunicação implica em aceitação da \
             vistoria realizada nos termos descritos acima.",
            bundle.owner.email
        )));

        if !photos.is_empty() {
            doc.push(elements::PageBreak::new());
            push_photo_grid(&mut doc, photos)?;
        }

        push_signature_block(&mut doc, false);
        render(doc)
    }

    // POST /generate-report — resumo financeiro do ano corrente em tabelas.
    pub async fn yearly_report_pdf(&self, owner_id: Uuid) -> Result<Vec<u8>, AppError> {
        let year = chrono::Utc::now().date_naive().year();

        let total_income = self.dashboard_repo.yearly_paid_income(owner_id, year).await?;
        let total_expenses = self.dashboard_repo.yearly_expenses(owner_id, year).await?;
        let expenses_by_kind = self.dashboard_repo.expenses_by_kind(owner_id, year).await?;
        let occupancy = self.dashboard_repo.occupancy_by_status(owner_id).await?;
        let income_by_month = self.dashboard_repo.paid_income_by_month(owner_id, year).await?;
        let expenses_by_month = self.dashboard_repo.expenses_by_month(owner_id, year).await?;

        let mut doc = self.new_document(format!("Relatório e-Aluguel {}", year))?;
        let bold = style::Style::new().bold();

        doc.push(
            elements::Paragraph::new("Relatório e-Aluguel")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!("Ano de referência: {}", year)));
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("Resumo Financeiro").styled(bold.with_font_size(13)),
        );
        doc.push(elements::Paragraph::new(format!(
            "No ano, a receita totalizou R$ {:.2}, enquanto as despesas foram de R$ {:.2}, \
             resultando em um saldo de R$ {:.2}.",
            total_income,
            total_expenses,
            total_income - total_expenses
        )));
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("Despesas por Tipo").styled(bold.with_font_size(13)),
        );
        let mut table = elements::TableLayout::new(vec![2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Tipo").styled(bold))
            .element(elements::Paragraph::new("Total (R$)").styled(bold))
            .push()
            .map_err(|e| AppError::PdfRender(e.to_string()))?;
        for row in &expenses_by_kind {
            table
                .row()
                .element(elements::Paragraph::new(expense_kind_label(&row.kind)))
                .element(elements::Paragraph::new(format!("{:.2}", row.total)))
                .push()
                .map_err(|e| AppError::PdfRender(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("Taxa de Ocupação dos Imóveis").styled(bold.with_font_size(13)),
        );
        let mut table = elements::TableLayout::new(vec![2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Status").styled(bold))
            .element(elements::Paragraph::new("N° Imóveis").styled(bold))
            .push()
            .map_err(|e| AppError::PdfRender(e.to_string()))?;
        for row in &occupancy {
            table
                .row()
                .element(elements::Paragraph::new(house_status_label(&row.status)))
                .element(elements::Paragraph::new(row.total.to_string()))
                .push()
                .map_err(|e| AppError::PdfRender(e.to_string()))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(1.5));

        doc.push(
            elements::Paragraph::new("Receita e Despesa por Mês").styled(bold.with_font_size(13)),
        );
        let mut table = elements::TableLayout::new(vec![1, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Mês").styled(bold))
            .element(elements::Paragraph::new("Receita (R$)").styled(bold))
            .element(elements::Paragraph::new("Despesa (R$)").styled(bold))
            .push()
            .map_err(|e| AppError::PdfRender(e.to_string()))?;
        for month in 1..=12 {
            let income = income_by_month
                .iter()
                .find(|r| r.month == month)
                .map(|r| r.total)
                .unwrap_or_default();
            let expense = expenses_by_month
                .iter()
                .find(|r| r.month == month)
                .map(|r| r.total)
                .unwrap_or_default();
            if income.is_zero() && expense.is_zero() {
                continue;
            }
            table
                .row()
                .element(elements::Paragraph::new(month.to_string()))
                .element(elements::Paragraph::new(format!("{:.2}", income)))
                .element(elements::Paragraph::new(format!("{:.2}", expense)))
                .push()
                .map_err(|e| AppError::PdfRender(e.to_string()))?;
        }
        doc.push(table);

        doc.push(elements::Break::new(2.0));
        doc.push(
            elements::Paragraph::new(format!(
                "Gerado em: {}",
                chrono::Local::now().format("%d/%m/%Y %H:%M:%S")
            ))
            .styled(style::Style::new().italic().with_font_size(8)),
        );

        render(doc)
    }

    fn new_document(&self, title: String) -> Result<genpdf::Document, AppError> {
        let font_family = genpdf::fonts::from_files(&self.fonts_dir, "Roboto", None)
            .map_err(|_| {
                AppError::FontNotFound(format!("Fonte não encontrada na pasta {}", self.fonts_dir))
            })?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(title);
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);
        Ok(doc)
    }
}

fn render(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::PdfRender(e.to_string()))?;
    Ok(buffer)
}

fn contract_title(kind: ContractKind) -> &'static str {
    match kind {
        ContractKind::Residential => "CONTRATO DE LOCAÇÃO RESIDENCIAL",
        ContractKind::Commercial => "CONTRATO DE LOCAÇÃO COMERCIAL",
    }
}

fn expense_kind_label(kind: &str) -> &'static str {
    match kind {
        "MAINTENANCE" => "Manutenção",
        "REPAIR" => "Reparo",
        "TAX" => "Imposto",
        _ => "Outros",
    }
}

fn house_status_label(status: &str) -> &'static str {
    match status {
        "RENTED" => "Alugada",
        "VACANT" => "Vaga",
        "RENOVATION" => "Em reforma",
        _ => "Outro",
    }
}

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("não informado")
}

// Qualificação das partes + cláusulas do contrato. Cada cláusula condicional
// (garagem, animais, sublocação, garantia, reajuste) ramifica no campo
// correspondente do template/contrato.
pub fn contract_paragraphs(bundle: &ContractBundle) -> Result<Vec<String>, AppError> {
    let contract = &bundle.contract;
    let template = &bundle.template;

    let mut paragraphs = vec![
        format!(
            "LOCADOR: {}, inscrito no CPF sob nº {}, e-mail {}, residente e domiciliado na {}.",
            bundle.owner.name,
            bundle.owner.cpf,
            bundle.owner.email,
            bundle.owner.address.legal_description()
        ),
        format!(
            "LOCATÁRIO: {}, {}, {}, inscrito no CPF sob nº {}, e-mail {}, residente e domiciliado na {}.",
            bundle.tenant.name,
            or_blank(&bundle.tenant.marital_status),
            or_blank(&bundle.tenant.profession),
            bundle.tenant.cpf,
            or_blank(&bundle.tenant.email),
            bundle.tenant.address.legal_description()
        ),
    ];

    if let Some(guarantor) = &bundle.guarantor {
        paragraphs.push(format!(
            "FIADOR: {}, inscrito no CPF sob nº {}, residente e domiciliado na {}.",
            guarantor.name,
            guarantor.cpf,
            guarantor.address.legal_description()
        ));
    }

    paragraphs.push(format!(
        "IMÓVEL OBJETO DA LOCAÇÃO: {} ({}), situado na {}.",
        bundle.house.nickname,
        bundle.property.nickname,
        bundle.property.address.legal_description()
    ));

    let mut clause_number = 0;
    let mut clause = |text: String| {
        clause_number += 1;
        format!("CLÁUSULA {}ª — {}", clause_number, text)
    };

    paragraphs.push(clause(format!(
        "O presente contrato tem por objeto a locação do imóvel acima descrito, para fim \
         exclusivamente {}, composto de {} cômodo(s) e {} banheiro(s), {}.",
        match template.kind {
            ContractKind::Residential => "residencial",
            ContractKind::Commercial => "comercial",
        },
        bundle.house.rooms,
        bundle.house.bathrooms,
        if bundle.house.furnished {
            "entregue mobiliado conforme termo de vistoria"
        } else {
            "entregue sem mobília"
        },
    )));

    paragraphs.push(clause(format!(
        "O prazo da locação é de {} até {}, data em que o LOCATÁRIO se obriga a restituir \
         o imóvel desocupado e nas condições recebidas.",
        contract.start_date.format("%d/%m/%Y"),
        contract.end_date.format("%d/%m/%Y"),
    )));

    paragraphs.push(clause(format!(
        "O aluguel mensal é de R$ {:.2}, com vencimento todo dia {} de cada mês.",
        contract.base_value, contract.due_day,
    )));

    paragraphs.push(clause(match contract.readjustment {
        Some(_) => "O valor do aluguel será reajustado anualmente pela variação do índice \
                    IGPM, ou outro que legalmente o substitua."
            .to_string(),
        None => "O valor do aluguel permanecerá fixo durante toda a vigência do contrato."
            .to_string(),
    }));

    match template.warranty {
        WarrantyKind::Guarantor => {
            // load_bundle garante o fiador quando a garantia exige
            let guarantor = bundle
                .guarantor
                .as_ref()
                .ok_or(AppError::ContractIncomplete("fiador não cadastrado"))?;
            paragraphs.push(clause(format!(
                "A locação é garantida por fiança prestada por {}, CPF nº {}, que responde \
                 solidariamente por todas as obrigações deste contrato.",
                guarantor.name, guarantor.cpf,
            )));
        }
        WarrantyKind::Deposit => {
            let deposit = contract.deposit_value.ok_or(AppError::ContractIncomplete(
                "o template exige caução e o contrato não tem valor de caução",
            ))?;
            paragraphs.push(clause(format!(
                "A locação é garantida por caução no valor de R$ {:.2}, a ser restituída ao \
                 final da locação, descontados eventuais débitos.",
                deposit,
            )));
        }
        WarrantyKind::None => {
            paragraphs.push(clause(
                "A locação é celebrada sem garantia, nos termos do art. 42 da Lei 8.245/91."
                    .to_string(),
            ));
        }
    }

    paragraphs.push(clause(if template.garage {
        "A locação inclui o uso de vaga de garagem vinculada ao imóvel.".to_string()
    } else {
        "A locação não inclui vaga de garagem.".to_string()
    }));

    paragraphs.push(clause(if template.pets {
        "É permitida a permanência de animais domésticos no imóvel, respondendo o \
         LOCATÁRIO por quaisquer danos por eles causados."
            .to_string()
    } else {
        "É vedada a permanência de animais de qualquer espécie no imóvel.".to_string()
    }));

    paragraphs.push(clause(if template.sublease {
        "É permitida a sublocação total ou parcial do imóvel, mediante comunicação \
         prévia e por escrito ao LOCADOR."
            .to_string()
    } else {
        "É vedada a sublocação, cessão ou empréstimo do imóvel, no todo ou em parte, \
         sem consentimento prévio e por escrito do LOCADOR."
            .to_string()
    }));

    paragraphs.push(clause(
        "Fica eleito o foro da comarca de situação do imóvel para dirimir quaisquer \
         controvérsias oriundas do presente contrato."
            .to_string(),
    ));

    Ok(paragraphs)
}

fn inspection_header_paragraphs(bundle: &ContractBundle) -> Vec<String> {
    vec![
        format!(
            "LOCADOR: {}, inscrito no CPF sob nº {}, e-mail {}, residente e domiciliado na {}.",
            bundle.owner.name,
            bundle.owner.cpf,
            bundle.owner.email,
            bundle.owner.address.legal_description()
        ),
        format!(
            "LOCATÁRIO: {}, {}, {}, inscrito no CPF sob nº {}, e-mail {}, residente e domiciliado na {}.",
            bundle.tenant.name,
            or_blank(&bundle.tenant.marital_status),
            or_blank(&bundle.tenant.profession),
            bundle.tenant.cpf,
            or_blank(&bundle.tenant.email),
            bundle.tenant.address.legal_description()
        ),
        format!(
            "IMÓVEL OBJETO DA LOCAÇÃO: Imóvel situado na {}.",
            bundle.property.address.legal_description()
        ),
        "Firmam por meio do presente o termo de vistoria e entrega das chaves ao \
         locatário para início na data de hoje da vigência do contrato de locação."
            .to_string(),
        "O presente termo é parte integrante do contrato de locação celebrado entre as \
         partes."
            .to_string(),
        "Pelo presente, declaram as partes que o imóvel acima indicado se encontra em bom \
         estado de conservação, com todos os acessórios em perfeito estado de funcionamento \
         e conservação, sendo que dessa forma o LOCATÁRIO se compromete a devolvê-lo no \
         mesmo estado, findo o prazo contratual, independente de vistoria final."
            .to_string(),
    ]
}

// Só as seções enviadas viram parágrafo, mantendo a numeração fixa dos itens.
pub fn inspection_sections(form: &InspectionForm) -> Vec<String> {
    let mut sections = Vec::new();
    let unspecified = "Não especificado".to_string();
    let none = "Nenhuma".to_string();

    if let Some(paint) = &form.paint {
        sections.push(format!(
            "1) PINTURA: {}, Tipo: {}, Cor: {}.",
            paint.condition.as_ref().unwrap_or(&unspecified),
            paint.paint_type.as_ref().unwrap_or(&unspecified),
            paint.color.as_deref().unwrap_or("Não especificada"),
        ));
    }
    let items: [(usize, &str, &Option<crate::models::contract::ItemCondition>); 8] = [
        (2, "ACABAMENTO", &form.finish),
        (3, "ELÉTRICA", &form.electrical),
        (4, "TRINCOS e FECHADURAS", &form.locks),
        (5, "PISOS E AZULEJOS", &form.flooring),
        (6, "VIDRAÇAS e JANELAS", &form.windows),
        (7, "TELHADO", &form.roof),
        (8, "HIDRÁULICA", &form.plumbing),
        (9, "MOBÍLIA", &form.furniture),
    ];
    for (number, label, item) in items {
        if let Some(item) = item {
            sections.push(format!(
                "{}) {}: {}, Observações: {}.",
                number,
                label,
                item.condition.as_ref().unwrap_or(&unspecified),
                item.notes.as_ref().unwrap_or(&none),
            ));
        }
    }
    if let Some(keys) = &form.keys {
        sections.push(format!(
            "10) CHAVES: Número: {}, Observações: {}.",
            keys.number.as_ref().unwrap_or(&unspecified),
            keys.notes.as_ref().unwrap_or(&none),
        ));
    }

    sections
}

// Grade de fotos, duas por linha, decodificadas em memória.
fn push_photo_grid(doc: &mut genpdf::Document, photos: &[Vec<u8>]) -> Result<(), AppError> {
    let mut table = elements::TableLayout::new(vec![1, 1]);

    for pair in photos.chunks(2) {
        let mut row = table.row();
        for bytes in pair {
            let dynamic_image = image::load_from_memory(bytes)
                .map_err(|_| AppError::BadRequest("Uma das fotos enviadas é inválida.".into()))?;
            let pdf_image = elements::Image::from_dynamic_image(dynamic_image)
                .map_err(|e| AppError::PdfRender(e.to_string()))?
                .with_alignment(Alignment::Center);
            row = row.element(pdf_image.padded(3));
        }
        if pair.len() == 1 {
            row = row.element(elements::Paragraph::new(""));
        }
        row.push().map_err(|e| AppError::PdfRender(e.to_string()))?;
    }

    doc.push(table);
    Ok(())
}

fn push_signature_block(doc: &mut genpdf::Document, with_guarantor: bool) {
    doc.push(elements::PageBreak::new());
    doc.push(elements::Break::new(6.0));

    let mut lines = vec!["Locatário", "Locador"];
    if with_guarantor {
        lines.push("Fiador");
    }
    lines.push("Testemunha");

    for label in lines {
        doc.push(
            elements::Paragraph::new("____________________________________")
                .aligned(Alignment::Center),
        );
        doc.push(elements::Paragraph::new(label).aligned(Alignment::Center));
        doc.push(elements::Break::new(1.5));
    }

    doc.push(elements::Break::new(2.0));
    doc.push(elements::Paragraph::new("Local: ________________________").aligned(Alignment::Center));
    doc.push(elements::Paragraph::new("Data: __/__/____").aligned(Alignment::Center));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::address::Address;
    use crate::models::auth::Owner;
    use crate::models::contract::{
        ItemCondition, KeysCondition, PaintCondition, ReadjustmentIndex, Template,
    };
    use crate::models::property::{House, HouseStatus, Property};
    use crate::models::tenant::Tenant;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn address() -> Address {
        Address {
            street: Some("Rua das Acácias".to_string()),
            neighborhood: Some("Centro".to_string()),
            number: Some(120),
            zip_code: Some("70000-000".to_string()),
            city: Some("Brasília".to_string()),
            state: Some("DF".to_string()),
        }
    }

    fn bundle(warranty: WarrantyKind) -> ContractBundle {
        let now = Utc::now();
        ContractBundle {
            contract: Contract {
                id: 1,
                deposit_value: Some(dec!(1500.00)),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                base_value: dec!(1000.00),
                due_day: 10,
                readjustment: Some(ReadjustmentIndex::Igpm),
                signed_pdf_url: None,
                house_id: 1,
                template_id: 1,
                tenant_id: 1,
                owner_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            template: Template {
                id: 1,
                name: "Residencial padrão".to_string(),
                description: None,
                garage: true,
                warranty,
                pets: false,
                sublease: false,
                kind: ContractKind::Residential,
                owner_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            tenant: Tenant {
                id: 1,
                cpf: "98765432100".to_string(),
                contact: "61988887777".to_string(),
                email: Some("maria@exemplo.com".to_string()),
                name: "Maria Pereira".to_string(),
                profession: Some("professora".to_string()),
                marital_status: Some("solteira".to_string()),
                birth_date: None,
                emergency_contact: None,
                income: None,
                residents: None,
                address: address(),
                owner_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            house: House {
                id: 1,
                nickname: "Casa 03".to_string(),
                photo_url: None,
                rooms: 4,
                bathrooms: 2,
                furnished: false,
                status: HouseStatus::Rented,
                property_id: 1,
                created_at: now,
                updated_at: now,
            },
            property: Property {
                id: 1,
                nickname: "Vila Norte".to_string(),
                photo_url: None,
                iptu_value: dec!(850.00),
                address: address(),
                owner_id: Uuid::new_v4(),
                created_at: now,
                updated_at: now,
            },
            owner: Owner {
                id: Uuid::new_v4(),
                email: "locador@exemplo.com".to_string(),
                password_hash: "hash".to_string(),
                name: "João da Silva".to_string(),
                phone: "61999990000".to_string(),
                cpf: "12345678901".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1980, 5, 20).unwrap(),
                marital_status: None,
                profession: None,
                signature_hash: None,
                photo_url: None,
                push_token: None,
                address: address(),
                created_at: now,
                updated_at: now,
            },
            guarantor: None,
        }
    }

    #[test]
    fn contrato_com_caucao_cita_o_valor() {
        let paragraphs = contract_paragraphs(&bundle(WarrantyKind::Deposit)).unwrap();
        let text = paragraphs.join("\n");
        assert!(text.contains("caução no valor de R$ 1500.00"));
        assert!(text.contains("IGPM"));
        assert!(text.contains("vaga de garagem vinculada"));
        assert!(text.contains("vedada a permanência de animais"));
        assert!(text.contains("vedada a sublocação"));
    }

    #[test]
    fn garantia_por_fiador_sem_fiador_falha() {
        let result = contract_paragraphs(&bundle(WarrantyKind::Guarantor));
        assert!(matches!(result, Err(AppError::ContractIncomplete(_))));
    }

    #[test]
    fn caucao_sem_valor_falha() {
        let mut b = bundle(WarrantyKind::Deposit);
        b.contract.deposit_value = None;
        let result = contract_paragraphs(&b);
        assert!(matches!(result, Err(AppError::ContractIncomplete(_))));
    }

    #[test]
    fn clausulas_sao_numeradas_em_sequencia() {
        let paragraphs = contract_paragraphs(&bundle(WarrantyKind::None)).unwrap();
        let clauses: Vec<&String> = paragraphs
            .iter()
            .filter(|p| p.starts_with("CLÁUSULA"))
            .collect();
        assert_eq!(clauses.len(), 9);
        assert!(clauses[0].starts_with("CLÁUSULA 1ª"));
        assert!(clauses[8].starts_with("CLÁUSULA 9ª"));
    }

    #[test]
    fn somente_secoes_enviadas_entram_no_laudo() {
        let form = InspectionForm {
            inspection_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            paint: Some(PaintCondition {
                condition: Some("Nova".to_string()),
                paint_type: Some("Acrílica".to_string()),
                color: None,
            }),
            finish: None,
            electrical: Some(ItemCondition {
                condition: Some("Boa".to_string()),
                notes: None,
            }),
            locks: None,
            flooring: None,
            windows: None,
            roof: None,
            plumbing: None,
            furniture: None,
            keys: Some(KeysCondition {
                number: Some("2".to_string()),
                notes: None,
            }),
        };

        let sections = inspection_sections(&form);
        assert_eq!(sections.len(), 3);
        assert!(sections[0].starts_with("1) PINTURA"));
        assert!(sections[0].contains("Não especificada"));
        assert!(sections[1].starts_with("3) ELÉTRICA"));
        assert!(sections[2].starts_with("10) CHAVES"));
    }
}
