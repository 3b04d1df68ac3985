//! Integration tests for report generation
//!
//! Builds field and table catalogs from the JSON fixtures in `testdata/`,
//! renders them and writes the reports to a temporary directory.

use anyhow::Result;
use chrono::{Local, TimeZone as _};
use datadoc::dictionary::storage::{REPORTS_DIR, report_path, save_report};
use datadoc::dictionary::{
    FieldCatalog, Importance, TableCatalog, infer_context, render_fields_markdown,
    render_tables_markdown,
};
use datadoc::io::load_df;
use datadoc::plot;
use std::path::Path;
use tempfile::tempdir;

fn generated_at() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 15, 9, 30, 0)
        .single()
        .expect("unambiguous local time")
}

#[test]
fn test_field_catalog_from_fixture() -> Result<()> {
    let catalog = FieldCatalog::from_specs_file("testdata/fields.json")?;
    assert_eq!(catalog.len(), 4);

    let descriptions: Vec<&str> = catalog
        .fields()
        .iter()
        .map(|f| f.description.as_str())
        .collect();
    assert!(descriptions[0].starts_with("**Nome Completo** é um campo do tipo texto"));
    assert!(descriptions[0].ends_with("Deve conter nome e sobrenome."));
    assert!(descriptions[1].contains("**único**"));
    assert!(descriptions[2].contains("valor mínimo de 0"));
    assert!(descriptions[3].contains("\"ativo\", \"inativo\", \"pendente\""));

    let md = render_fields_markdown(&catalog, "Campos do Cadastro", &generated_at());
    assert!(md.starts_with("# Campos do Cadastro\n"));
    assert!(md.contains("15/01/2024 às 09:30"));
    assert!(md.contains("## 4. status"));
    assert!(md.contains("| **Tamanho Máximo** | 100 caracteres |"));
    assert!(md.contains("| **Valor Padrão** | `ativo` |"));

    let json: serde_json::Value = serde_json::from_str(&catalog.to_json()?)?;
    let items = json.as_array().expect("catalog serializes as an array");
    assert_eq!(items.len(), 4);
    assert_eq!(items[1]["type"], "email");
    Ok(())
}

#[test]
fn test_table_catalog_from_fixture() -> Result<()> {
    let catalog = TableCatalog::from_file("testdata/tables.json")?;
    assert_eq!(catalog.len(), 3);

    let tables = catalog.tables();
    assert_eq!(tables[0].logical_name, "DADOS_DEPENDENTE_ENDERECO");
    assert_eq!(infer_context(&tables[0]).relationships.len(), 2);
    assert_eq!(infer_context(&tables[1]).importance, Importance::High);

    let medico = infer_context(&tables[2]);
    assert_eq!(medico.entity_type, "cadastro de profissional");
    assert_eq!(medico.domain, "seguros");

    let md = render_tables_markdown(&catalog, "Tabelas", &generated_at());
    assert!(md.contains("**3 tabelas**"));
    assert!(md.contains("3. [TB_MEDICO](#tb_medico) - Medico"));
    assert!(md.contains("- **Tipo de Entidade:** Cadastro De Profissional"));
    assert!(md.contains("- **Domínio:** Seguros"));
    assert!(md.contains("- **Importância:** Média"));
    Ok(())
}

#[test]
fn test_reports_saved_under_reports_dir() -> Result<()> {
    let dir = tempdir()?;
    let fields = FieldCatalog::from_specs_file("testdata/fields.json")?;
    let tables = TableCatalog::from_file("testdata/tables.json")?;

    let fields_path = save_report(
        &render_fields_markdown(&fields, "Campos", &generated_at()),
        &report_path(dir.path(), "campos", "md"),
    )?;
    save_report(
        &render_tables_markdown(&tables, "Tabelas", &generated_at()),
        &report_path(dir.path(), "tabelas", "md"),
    )?;

    assert!(std::fs::read_to_string(fields_path)?.contains("## 1. nome_completo"));
    assert!(dir.path().join(REPORTS_DIR).join("tabelas.md").is_file());
    Ok(())
}

#[test]
fn test_plot_data_from_fixture() -> Result<()> {
    let df = load_df(Path::new("testdata/mixed_types.csv"))?;

    let hist = plot::histogram(&df, "val1", 4, None)?;
    assert_eq!(hist.missing, 1, "'abc' is not a number");
    assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 4);

    let boxes = plot::boxplot(&df, &["val1", "val2"], None)?;
    assert_eq!(boxes.title, "Boxplot: val1, val2");
    assert_eq!(boxes.boxes[1].max, Some(4.0));
    Ok(())
}
