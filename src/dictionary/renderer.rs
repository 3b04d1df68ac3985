//! Markdown rendering for field and table catalogs.
//!
//! Generates human-readable documentation from the descriptors produced by
//! [`super::fields`] and [`super::tables`].

use super::fields::FieldCatalog;
use super::tables::{
    TableCatalog, expanded_description, friendly_name, infer_context, technical_considerations,
    usage_purposes,
};
use crate::utils::title_case;
use chrono::{DateTime, Local};

/// Default title for field reports.
pub const DEFAULT_FIELDS_TITLE: &str = "Documentação de Campos";

/// Default title for table reports.
pub const DEFAULT_TABLES_TITLE: &str = "Documentação de Tabelas do Banco de Dados";

fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format("%d/%m/%Y às %H:%M").to_string()
}

/// Render a field catalog as Markdown.
///
/// Each field gets its generated paragraph followed by a technical
/// specification table listing only the constraints that are set.
pub fn render_fields_markdown(
    catalog: &FieldCatalog,
    title: &str,
    generated_at: &DateTime<Local>,
) -> String {
    let mut lines = vec![
        format!("# {title}\n"),
        format!("*Gerado automaticamente em {}*\n", format_timestamp(generated_at)),
        "---\n".to_owned(),
    ];

    for (i, field) in catalog.fields().iter().enumerate() {
        let spec = &field.spec;
        lines.push(format!("\n## {}. {}\n", i + 1, spec.name));
        lines.push(format!("{}\n", field.description));

        lines.push("\n### Especificações Técnicas\n".to_owned());
        lines.push("| Propriedade | Valor |".to_owned());
        lines.push("|-------------|-------|".to_owned());
        lines.push(format!("| **Nome do Campo** | `{}` |", spec.name));
        lines.push(format!("| **Tipo de Dados** | `{}` |", spec.kind));
        lines.push(format!(
            "| **Obrigatório** | {} |",
            if spec.required { "Sim" } else { "Não" }
        ));

        if let Some(min) = spec.min_length() {
            lines.push(format!("| **Tamanho Mínimo** | {min} caracteres |"));
        }
        if let Some(max) = spec.max_length() {
            lines.push(format!("| **Tamanho Máximo** | {max} caracteres |"));
        }
        if let Some(min) = spec.min_value {
            lines.push(format!("| **Valor Mínimo** | {min} |"));
        }
        if let Some(max) = spec.max_value {
            lines.push(format!("| **Valor Máximo** | {max} |"));
        }
        if let Some(default) = spec.default_value() {
            lines.push(format!("| **Valor Padrão** | `{default}` |"));
        }
        if spec.unique {
            lines.push("| **Único** | Sim |".to_owned());
        }
        if !spec.options.is_empty() {
            let options = spec
                .options
                .iter()
                .map(|op| format!("`{op}`"))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!("| **Opções Válidas** | {options} |"));
        }

        lines.push(String::new());
    }

    lines.join("\n")
}

/// Render a table catalog as Markdown.
///
/// Layout: executive summary, linked index, one section per table
/// (basic info, expanded description, purposes, technical considerations,
/// inferred context) and closing notes.
pub fn render_tables_markdown(
    catalog: &TableCatalog,
    title: &str,
    generated_at: &DateTime<Local>,
) -> String {
    let tables = catalog.tables();
    let mut md = String::new();

    md.push_str(&format!("# {title}\n"));
    md.push_str(&format!(
        "*Documentação gerada automaticamente em {}*\n",
        format_timestamp(generated_at)
    ));
    md.push_str("---\n");
    md.push_str("\n## Sumário Executivo\n");
    md.push_str(&format!(
        "Este documento apresenta a documentação detalhada de **{} tabelas** do banco de dados, ",
        tables.len()
    ));
    md.push_str(
        "incluindo descritivos expandidos, finalidades de uso e considerações técnicas importantes.\n",
    );
    md.push_str("\n---\n");

    // Index
    md.push_str("\n## Índice de Tabelas\n");
    for (i, table) in tables.iter().enumerate() {
        md.push_str(&format!(
            "{}. [{}](#{}) - {}\n",
            i + 1,
            table.logical_name,
            table.logical_name.to_lowercase(),
            friendly_name(&table.logical_name)
        ));
    }
    md.push_str("\n---\n");

    for (i, table) in tables.iter().enumerate() {
        md.push_str(&format!("\n## {}. {}\n", i + 1, table.logical_name));
        md.push_str(&format!("### {}\n", friendly_name(&table.logical_name)));

        md.push_str("\n#### 📋 Informações Básicas\n");
        md.push_str(&format!("**Nome Lógico:** `{}`\n\n", table.logical_name));
        md.push_str(&format!(
            "**Descrição Original:** {}\n",
            table.basic_description
        ));

        md.push_str("\n#### 📖 Descritivo Detalhado\n");
        md.push_str(&format!("{}\n", expanded_description(table)));

        md.push_str("\n#### 🎯 Finalidade e Uso\n");
        for purpose in usage_purposes(table) {
            md.push_str(&format!("- {purpose}\n"));
        }

        let considerations = technical_considerations(table);
        if !considerations.is_empty() {
            md.push_str("\n#### ⚙️ Considerações Técnicas\n");
            for note in considerations {
                md.push_str(&format!("- {note}\n"));
            }
        }

        let ctx = infer_context(table);
        md.push_str("\n#### 🔗 Contexto no Sistema\n");
        md.push_str(&format!("- **Domínio:** {}\n", title_case(&ctx.domain)));
        md.push_str(&format!(
            "- **Tipo de Entidade:** {}\n",
            title_case(&ctx.entity_type)
        ));
        md.push_str(&format!(
            "- **Importância:** {}\n",
            title_case(ctx.importance.label())
        ));

        if i + 1 < tables.len() {
            md.push_str("\n---\n");
        }
    }

    md.push_str("\n---\n");
    md.push_str("\n## Notas Finais\n");
    md.push_str("Esta documentação foi gerada automaticamente com base nas informações fornecidas. ");
    md.push_str("Recomenda-se revisar e complementar com detalhes específicos sobre colunas, índices, ");
    md.push_str("relacionamentos e regras de negócio particulares de cada tabela.\n");

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::fields::FieldSpec;
    use chrono::TimeZone as _;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 0)
            .single()
            .expect("unambiguous local time")
    }

    #[test]
    fn test_render_fields_markdown() {
        let mut catalog = FieldCatalog::new();
        catalog.add_field(FieldSpec {
            required: true,
            unique: true,
            options: vec!["a".to_owned(), "b".to_owned()],
            ..FieldSpec::new("codigo", "char")
        });

        let md = render_fields_markdown(&catalog, DEFAULT_FIELDS_TITLE, &fixed_time());

        assert!(md.starts_with("# Documentação de Campos\n"));
        assert!(md.contains("*Gerado automaticamente em 05/03/2024 às 14:07*"));
        assert!(md.contains("## 1. codigo"));
        assert!(md.contains("| **Obrigatório** | Sim |"));
        assert!(md.contains("| **Único** | Sim |"));
        assert!(md.contains("| **Opções Válidas** | `a`, `b` |"));
        assert!(!md.contains("Tamanho Mínimo"));
    }

    #[test]
    fn test_render_tables_markdown() {
        let mut catalog = TableCatalog::new();
        catalog.add_table("DADOS_FATURAMENTO", "Faturamento de apólices");
        catalog.add_table("TB_LOG", "Eventos");

        let md = render_tables_markdown(&catalog, "Tabelas", &fixed_time());

        assert!(md.contains("**2 tabelas**"));
        assert!(md.contains("1. [DADOS_FATURAMENTO](#dados_faturamento) - Faturamento"));
        assert!(md.contains("#### ⚙️ Considerações Técnicas"));
        assert!(md.contains("- **Domínio:** Financeiro"));
        assert!(md.contains("- **Importância:** Alta"));
        assert!(md.contains("- **Tipo de Entidade:** Dados"));
        assert!(md.ends_with("particulares de cada tabela.\n"));
    }

    #[test]
    fn test_render_empty_tables() {
        let md = render_tables_markdown(&TableCatalog::new(), DEFAULT_TABLES_TITLE, &fixed_time());
        assert!(md.contains("**0 tabelas**"));
        assert!(md.contains("## Notas Finais"));
    }
}
