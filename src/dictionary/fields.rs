//! Field-level documentation: one descriptive paragraph per form or column field.

use crate::utils::humanize;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declared properties of a field, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    /// Type name (`string`, `integer`, `email`, `cpf`, ...). Unknown names are
    /// echoed verbatim in the description.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub required: bool,

    /// Minimum length in characters; zero means unconstrained
    #[serde(default)]
    pub min_length: Option<u32>,

    /// Maximum length in characters; zero means unconstrained
    #[serde(default)]
    pub max_length: Option<u32>,

    #[serde(default)]
    pub min_value: Option<f64>,

    #[serde(default)]
    pub max_value: Option<f64>,

    /// Value used when the field is left blank
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub unique: bool,

    /// Free text appended to the generated description
    #[serde(default)]
    pub custom_description: Option<String>,

    /// Accepted values for selection fields
    #[serde(default)]
    pub options: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: false,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            default: None,
            unique: false,
            custom_description: None,
            options: Vec::new(),
        }
    }

    pub(crate) fn min_length(&self) -> Option<u32> {
        self.min_length.filter(|&n| n > 0)
    }

    pub(crate) fn max_length(&self) -> Option<u32> {
        self.max_length.filter(|&n| n > 0)
    }

    pub(crate) fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }

    pub(crate) fn custom_description(&self) -> Option<&str> {
        self.custom_description.as_deref().filter(|d| !d.is_empty())
    }
}

/// A field together with its generated description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(flatten)]
    pub spec: FieldSpec,

    pub description: String,
}

/// Ordered collection of documented fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCatalog {
    fields: Vec<FieldDescriptor>,
}

impl FieldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a JSON array of [`FieldSpec`]s.
    pub fn from_specs_json(json: &str) -> Result<Self> {
        let specs: Vec<FieldSpec> =
            serde_json::from_str(json).context("Failed to parse field specs JSON")?;
        let mut catalog = Self::new();
        for spec in specs {
            catalog.add_field(spec);
        }
        Ok(catalog)
    }

    /// Load field specs from a JSON file.
    pub fn from_specs_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field specs: {}", path.display()))?;
        Self::from_specs_json(&content)
    }

    /// Describe `spec` and append it to the catalog.
    pub fn add_field(&mut self, spec: FieldSpec) -> &FieldDescriptor {
        let description = describe_field(&spec);
        self.fields.push(FieldDescriptor { spec, description });
        let idx = self.fields.len() - 1;
        &self.fields[idx]
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Export every descriptor as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize field catalog")
    }
}

/// Human description of a type name. Lookup ignores case; unknown names are
/// returned as given.
pub fn type_description(kind: &str) -> &str {
    match kind.to_lowercase().as_str() {
        "string" | "text" | "varchar" => "texto",
        "char" => "caractere",
        "int" | "integer" => "número inteiro",
        "float" | "decimal" | "double" => "número decimal",
        "boolean" => "valor booleano (verdadeiro/falso)",
        "bool" => "valor booleano (sim/não)",
        "date" => "data",
        "datetime" => "data e hora",
        "timestamp" => "registro de data e hora",
        "time" => "hora",
        "email" => "endereço de e-mail",
        "url" => "endereço URL",
        "phone" => "número de telefone",
        "cpf" => "CPF",
        "cnpj" => "CNPJ",
        "cep" => "CEP",
        "json" => "objeto JSON",
        "array" => "lista/array",
        "file" => "arquivo",
        "image" => "imagem",
        "password" => "senha",
        _ => kind,
    }
}

/// Assemble the descriptive paragraph for one field.
pub fn describe_field(spec: &FieldSpec) -> String {
    let mut text = format!(
        "**{}** é um campo do tipo {} ",
        humanize(&spec.name),
        type_description(&spec.kind)
    );

    if spec.required {
        text.push_str("de preenchimento **obrigatório** ");
    } else {
        text.push_str("de preenchimento **opcional** ");
    }

    let mut lengths = Vec::new();
    if let Some(min) = spec.min_length() {
        lengths.push(format!("mínimo de {min} caracteres"));
    }
    if let Some(max) = spec.max_length() {
        lengths.push(format!("máximo de {max} caracteres"));
    }
    if !lengths.is_empty() {
        text.push_str(&format!(", com {}", lengths.join(" e ")));
    }

    let mut bounds = Vec::new();
    if let Some(min) = spec.min_value {
        bounds.push(format!("valor mínimo de {min}"));
    }
    if let Some(max) = spec.max_value {
        bounds.push(format!("valor máximo de {max}"));
    }
    if !bounds.is_empty() {
        text.push_str(&format!(", com {}", bounds.join(" e ")));
    }

    if spec.options.is_empty() {
        text.push('.');
    } else {
        let options = spec
            .options
            .iter()
            .map(|op| format!("\"{op}\""))
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(". As opções válidas são: {options}"));
    }

    if spec.unique {
        text.push_str(
            " O valor deste campo deve ser **único** no sistema, não podendo haver duplicatas.",
        );
    }

    if let Some(default) = spec.default_value() {
        text.push_str(&format!(
            " Caso não seja informado, o valor padrão será: **{default}**."
        ));
    }

    if let Some(custom) = spec.custom_description() {
        text.push(' ');
        text.push_str(custom);
    }

    text
}
