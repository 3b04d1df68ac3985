//! Table-level documentation: expands a one-line table description into an
//! overview with inferred domain, purposes and technical considerations.
//!
//! Inference is keyword based. Keywords are matched as lowercase substrings of
//! the logical name and of the basic description.

use crate::utils::title_case;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefixes stripped from logical names when building the friendly name.
const NAME_PREFIXES: [&str; 3] = ["DADOS_", "TB_", "TBL_"];

/// A table as declared by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(alias = "nome_logico")]
    pub logical_name: String,

    #[serde(alias = "descricao_basica")]
    pub basic_description: String,
}

impl TableSpec {
    pub fn new(logical_name: impl Into<String>, basic_description: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            basic_description: basic_description.into(),
        }
    }

    fn lower_name(&self) -> String {
        self.logical_name.to_lowercase()
    }

    fn lower_description(&self) -> String {
        self.basic_description.to_lowercase()
    }
}

/// Importance of a table to business operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Medium,
    High,
}

impl Importance {
    pub fn label(self) -> &'static str {
        match self {
            Self::Medium => "média",
            Self::High => "alta",
        }
    }
}

/// Context inferred from a table's name and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContext {
    pub entity_type: String,
    pub domain: String,
    pub relationships: Vec<String>,
    pub importance: Importance,
}

impl Default for TableContext {
    fn default() -> Self {
        Self {
            entity_type: "dados".to_owned(),
            domain: "geral".to_owned(),
            relationships: Vec::new(),
            importance: Importance::Medium,
        }
    }
}

/// Strip common prefixes, replace underscores and title-case.
pub fn friendly_name(logical_name: &str) -> String {
    let stripped = NAME_PREFIXES
        .iter()
        .fold(logical_name.to_owned(), |name, prefix| name.replace(prefix, ""));
    title_case(&stripped.replace('_', " "))
}

/// Infer entity type, domain, relationships and importance. Later rules
/// override the entity type set by earlier ones.
pub fn infer_context(table: &TableSpec) -> TableContext {
    let name = table.lower_name();
    let desc = table.lower_description();
    let mut ctx = TableContext::default();

    if name.contains("dependente") || desc.contains("dependente") {
        ctx.entity_type = "entidade dependente".to_owned();
        ctx.relationships
            .push("relacionada a titular ou beneficiário principal".to_owned());
    }

    if name.contains("endereco") || desc.contains("endereço") {
        ctx.entity_type = "dados de localização".to_owned();
        ctx.relationships
            .push("pode estar vinculada a pessoas, empresas ou estabelecimentos".to_owned());
    }

    if name.contains("faturamento") || desc.contains("fatura") {
        ctx.entity_type = "transação financeira".to_owned();
        ctx.domain = "financeiro".to_owned();
        ctx.importance = Importance::High;
        ctx.relationships
            .push("relacionada a apólices e seguros".to_owned());
    }

    if name.contains("medico") || desc.contains("médico") {
        ctx.entity_type = "cadastro de profissional".to_owned();
        ctx.domain = "saúde".to_owned();
        ctx.relationships
            .push("referenciado em atendimentos e procedimentos".to_owned());
    }

    if desc.contains("apolice") || desc.contains("seguro") {
        ctx.domain = "seguros".to_owned();
        ctx.importance = Importance::High;
    }

    ctx
}

/// Expanded prose description of a table.
pub fn expanded_description(table: &TableSpec) -> String {
    let ctx = infer_context(table);
    let mut text = format!(
        "A tabela **{}** ({}) é responsável por armazenar {}",
        table.logical_name,
        friendly_name(&table.logical_name),
        table.lower_description()
    );

    if ctx.domain != "geral" {
        text.push_str(&format!(
            " Esta tabela faz parte do domínio **{}** do sistema",
            ctx.domain
        ));
        if ctx.importance == Importance::High {
            text.push_str(" e possui **importância crítica** para as operações do negócio");
        }
    }
    text.push('.');

    if ctx.entity_type != "dados" {
        text.push_str(&format!(
            " Trata-se de uma tabela de **{}**.",
            ctx.entity_type
        ));
    }

    if let Some((first, rest)) = ctx.relationships.split_first() {
        text.push_str(&format!(" Esta tabela está {first}"));
        if !rest.is_empty() {
            text.push_str(&format!(", além de {}", rest.join(", ")));
        }
        text.push('.');
    }

    text
}

/// Typical uses of the table. The first matching name keyword decides.
pub fn usage_purposes(table: &TableSpec) -> Vec<&'static str> {
    let name = table.lower_name();

    if name.contains("dependente") {
        vec![
            "Cadastro e gestão de dependentes vinculados a titulares de planos ou seguros",
            "Controle de elegibilidade e direitos dos dependentes",
            "Geração de relatórios familiares e análises demográficas",
        ]
    } else if name.contains("endereco") {
        vec![
            "Registro de endereços para correspondências e comunicações oficiais",
            "Validação de localização geográfica para cobertura de serviços",
            "Análises de distribuição geográfica e regionalização",
        ]
    } else if name.contains("faturamento") {
        vec![
            "Registro de todas as transações de faturamento de apólices e seguros",
            "Controle financeiro e conciliação de pagamentos",
            "Base para relatórios gerenciais, auditorias e análises de receita",
            "Suporte a processos de cobrança e gestão de inadimplência",
        ]
    } else if name.contains("medico") {
        vec![
            "Cadastro completo de médicos e profissionais de saúde credenciados",
            "Controle de especialidades, credenciamentos e vínculos",
            "Suporte à rede referenciada e direcionamento de atendimentos",
            "Base para análises de utilização e gestão da rede credenciada",
        ]
    } else {
        vec![
            "Armazenamento estruturado de informações essenciais ao negócio",
            "Suporte a operações transacionais e consultas do sistema",
            "Base para relatórios e análises gerenciais",
        ]
    }
}

/// Security, privacy, performance and integrity notes. May be empty.
pub fn technical_considerations(table: &TableSpec) -> Vec<&'static str> {
    let name = table.lower_name();
    let desc = table.lower_description();
    let mut notes = Vec::new();

    if ["faturamento", "financeiro", "pagamento"]
        .iter()
        .any(|word| name.contains(word) || desc.contains(word))
    {
        notes.push(
            "**Segurança**: Esta tabela contém dados financeiros sensíveis e deve ter controles de acesso rigorosos e auditoria habilitada",
        );
    }

    if name.contains("medico") || desc.contains("profissional") {
        notes.push(
            "**Privacidade**: Dados de profissionais de saúde estão sujeitos à LGPD e regulamentações do setor de saúde",
        );
    }

    if name.contains("dependente") {
        notes.push(
            "**Privacidade**: Contém dados pessoais protegidos pela LGPD, especialmente quando envolvem menores de idade",
        );
    }

    if name.contains("faturamento") {
        notes.push(
            "**Performance**: Tabela com alto volume de transações, recomenda-se particionamento por período e índices otimizados",
        );
        notes.push(
            "**Retenção**: Definir política de arquivamento para dados históricos conforme requisitos legais e fiscais",
        );
    }

    if name.contains("endereco") {
        notes.push(
            "**Integridade**: Implementar validações de CEP, normalização de endereços e integração com APIs de geolocalização",
        );
    }

    if name.contains("dependente") || name.contains("medico") {
        notes.push(
            "**Integridade Referencial**: Manter chaves estrangeiras e constraints para garantir consistência dos relacionamentos",
        );
    }

    notes
}

/// Ordered collection of tables to document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableCatalog {
    tables: Vec<TableSpec>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of tables. Accepts both `logical_name` /
    /// `basic_description` and `nome_logico` / `descricao_basica` keys.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse tables JSON")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tables file: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn add_table(&mut self, logical_name: impl Into<String>, basic_description: impl Into<String>) {
        self.tables
            .push(TableSpec::new(logical_name, basic_description));
    }

    pub fn tables(&self) -> &[TableSpec] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendly_name() {
        assert_eq!(friendly_name("DADOS_DEPENDENTE"), "Dependente");
        assert_eq!(friendly_name("TB_ENDERECO_CLIENTE"), "Endereco Cliente");
        assert_eq!(friendly_name("TBL_MEDICO"), "Medico");
    }

    #[test]
    fn test_infer_context_billing() {
        let table = TableSpec::new("DADOS_FATURAMENTO", "Registros de faturamento de apólices");
        let ctx = infer_context(&table);

        assert_eq!(ctx.entity_type, "transação financeira");
        assert_eq!(ctx.domain, "financeiro");
        assert_eq!(ctx.importance, Importance::High);
        assert_eq!(ctx.relationships, vec!["relacionada a apólices e seguros"]);
    }

    #[test]
    fn test_infer_context_insurance_overrides_domain() {
        let table = TableSpec::new("DADOS_MEDICO", "Cadastro de médicos do seguro saúde");
        let ctx = infer_context(&table);

        assert_eq!(ctx.entity_type, "cadastro de profissional");
        assert_eq!(ctx.domain, "seguros");
        assert_eq!(ctx.importance, Importance::High);
    }

    #[test]
    fn test_infer_context_default() {
        let ctx = infer_context(&TableSpec::new("TB_LOG", "Eventos do sistema"));
        assert_eq!(ctx, TableContext::default());
    }

    #[test]
    fn test_expanded_description_generic() {
        let table = TableSpec::new("TB_LOG", "Eventos do sistema");
        assert_eq!(
            expanded_description(&table),
            "A tabela **TB_LOG** (Log) é responsável por armazenar eventos do sistema."
        );
    }

    #[test]
    fn test_expanded_description_with_relationships() {
        let table = TableSpec::new("DADOS_DEPENDENTE_ENDERECO", "Endereço dos dependentes");
        let text = expanded_description(&table);

        assert!(text.contains("Trata-se de uma tabela de **dados de localização**."));
        assert!(text.contains(
            "Esta tabela está relacionada a titular ou beneficiário principal, além de pode estar vinculada"
        ));
    }

    #[test]
    fn test_usage_first_match_wins() {
        let table = TableSpec::new("DADOS_DEPENDENTE_MEDICO", "x");
        assert_eq!(usage_purposes(&table).len(), 3);
        assert!(usage_purposes(&table)[0].starts_with("Cadastro e gestão de dependentes"));
    }

    #[test]
    fn test_technical_considerations() {
        let billing = TableSpec::new("DADOS_FATURAMENTO", "Faturas");
        let notes = technical_considerations(&billing);
        assert_eq!(notes.len(), 3);
        assert!(notes[0].starts_with("**Segurança**"));

        let plain = TableSpec::new("TB_LOG", "Eventos");
        assert!(technical_considerations(&plain).is_empty());
    }

    #[test]
    fn test_catalog_accepts_portuguese_keys() -> Result<()> {
        let catalog = TableCatalog::from_json(
            r#"[{"nome_logico": "DADOS_MEDICO", "descricao_basica": "Cadastro de médicos"}]"#,
        )?;
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.tables()[0].logical_name, "DADOS_MEDICO");
        Ok(())
    }
}
