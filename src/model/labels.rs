//! Human-readable labels for flow steps
//!
//! The phrases are Spanish, matching the dashboards these graphs are drawn
//! in. Labels are presentation only and never persisted.

use std::sync::LazyLock;

use regex::Regex;

use super::step::{FlowStep, StepType};
use crate::parser::strip_brackets;
use crate::util::{collapse_whitespace, contains_ci, truncate_with_ellipsis};

/// Longest fallback label, in characters, before `...`
pub const MAX_LABEL_CHARS: usize = 70;

static SELECT_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFROM\s+([\w.\[\]]+)").unwrap());
static INSERT_INTO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bINSERT\s+INTO\s+([\w.\[\]]+)").unwrap());
static UPDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUPDATE\s+([\w.\[\]]+)").unwrap());
static DELETE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDELETE\s+(?:FROM\s+)?([\w.\[\]]+)").unwrap());

/// Category heading for a step node
pub fn category_label(step_type: StepType) -> &'static str {
    match step_type {
        StepType::Params => "Parámetros de Entrada",
        StepType::Select => "Extracción de Datos",
        StepType::Insert => "Proceso de Inserción",
        StepType::Update => "Actualización de Registros",
        StepType::Delete => "Eliminación de Datos",
        StepType::If => "Validación de Regla",
        StepType::Else => "Ruta Alternativa",
        StepType::Return => "Resultado Final",
    }
}

/// First table captured by `re` in `content`, brackets stripped
pub(crate) fn first_table(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| strip_brackets(m.as_str()))
        .filter(|t| !t.is_empty())
}

pub(crate) fn insert_target(content: &str) -> Option<String> {
    first_table(&INSERT_INTO_RE, content)
}

pub(crate) fn update_target(content: &str) -> Option<String> {
    first_table(&UPDATE_RE, content)
}

pub(crate) fn delete_target(content: &str) -> Option<String> {
    first_table(&DELETE_RE, content)
}

/// Short phrase describing what a step does.
///
/// Data-manipulation steps are named after their primary table; lookups in
/// procedures whose name mentions SEEK or GET read as "Consultar datos de".
/// Anything else falls back to the first 70 characters of the SQL.
pub fn business_label(step: &FlowStep, procedure_name: &str) -> String {
    let content = collapse_whitespace(&step.content);

    let label = match step.step_type {
        StepType::Select => Some(select_label(&content, procedure_name)),
        StepType::Insert => insert_target(&content).map(|t| format!("Registrar en {t}")),
        StepType::Update => update_target(&content).map(|t| format!("Actualizar {t}")),
        StepType::Delete => delete_target(&content).map(|t| format!("Borrar de {t}")),
        _ => None,
    };

    label.unwrap_or_else(|| truncate_with_ellipsis(&content, MAX_LABEL_CHARS))
}

fn select_label(content: &str, procedure_name: &str) -> String {
    match first_table(&SELECT_FROM_RE, content) {
        Some(table) if is_lookup_procedure(procedure_name) => format!("Consultar datos de {table}"),
        Some(table) => format!("Obtener de {table}"),
        None => "Consulta de Información".to_string(),
    }
}

fn is_lookup_procedure(procedure_name: &str) -> bool {
    contains_ci(procedure_name, "SEEK") || contains_ci(procedure_name, "GET")
}
