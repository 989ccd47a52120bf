//! Mermaid flowchart rendering
//!
//! Produces a `graph TD` definition of the same chain the graph builder
//! emits: Start, one node per step, dotted links to table nodes, End. Node
//! text uses its own, slightly different, category names.

use crate::model::{delete_target, insert_target, update_target, FlowStep, StepType};
use crate::util::truncate_with_ellipsis;

/// Longest step text, in characters, before `...`
const MAX_TEXT_CHARS: usize = 80;

const CLASS_DEFS: &[&str] = &[
    "classDef start fill:#1e293b,stroke:#3b82f6,stroke-width:2px,color:#3b82f6,font-weight:bold;",
    "classDef params fill:#1e293b,stroke:#f59e0b,stroke-width:2px,color:#f59e0b;",
    "classDef process fill:#1e293b,stroke:#10b981,stroke-width:2px,color:#10b981;",
    "classDef select fill:#1e293b,stroke:#06b6d4,stroke-width:2px,color:#06b6d4;",
    "classDef logic fill:#1e293b,stroke:#a855f7,stroke-width:2px,color:#a855f7;",
    "classDef table fill:#1e293b,stroke:#84cc16,stroke-width:1px,color:#84cc16,cursor:pointer;",
];

fn mermaid_category(step_type: StepType) -> &'static str {
    match step_type {
        StepType::Params => "Parámetros de Entrada",
        StepType::Select => "Consulta de Datos",
        StepType::Insert => "Proceso de Inserción",
        StepType::Update => "Proceso de Actualización",
        StepType::Delete => "Proceso de Eliminación",
        StepType::If => "Validación Condicional",
        StepType::Else => "Alternativa",
        StepType::Return => "Retorno de Valor",
    }
}

fn class_suffix(step_type: StepType) -> &'static str {
    match step_type {
        StepType::Params => ":::params",
        StepType::Select => ":::select",
        StepType::Insert | StepType::Update | StepType::Delete => ":::process",
        StepType::If | StepType::Else => ":::logic",
        StepType::Return => "",
    }
}

fn step_text(step: &FlowStep) -> String {
    let friendly = match step.step_type {
        StepType::Insert => insert_target(&step.content).map(|t| format!("Insertar en {t}")),
        StepType::Update => update_target(&step.content).map(|t| format!("Actualizar {t}")),
        StepType::Delete => delete_target(&step.content).map(|t| format!("Eliminar de {t}")),
        _ => None,
    };
    let text = friendly.unwrap_or_else(|| step.content.clone());
    truncate_with_ellipsis(&text.replace('"', "'"), MAX_TEXT_CHARS)
}

fn node_shape(step_type: StepType, label: &str) -> String {
    match step_type {
        StepType::If => format!("{{\"{label}\"}}"),
        StepType::Return => format!("([\"{label}\"])"),
        _ => format!("[\"{label}\"]"),
    }
}

/// Render steps as a Mermaid `graph TD` flowchart
pub fn render_mermaid(steps: &[FlowStep], procedure_name: &str) -> String {
    let mut lines = vec![
        "graph TD".to_string(),
        format!("  %% {}", procedure_name.replace('\n', " ")),
        "  Start([Inicio del Procedimiento]):::start".to_string(),
    ];

    match steps.first() {
        Some(first) => lines.push(format!("  Start --> {}", first.id)),
        None => lines.push("  Start --> End".to_string()),
    }

    for step in steps {
        let label = format!(
            "<b>{}</b><br/>{}",
            mermaid_category(step.step_type),
            step_text(step)
        );
        lines.push(format!(
            "  {}{}{}",
            step.id,
            node_shape(step.step_type, &label),
            class_suffix(step.step_type)
        ));

        for (idx, table) in step.tables.iter().enumerate() {
            let table_id = format!("table_{}_{}", step.id, idx);
            lines.push(format!("  {table_id}[(\"{table}\")]:::table"));
            lines.push(format!("  {} -.-> {table_id}", step.id));
        }

        match &step.next {
            Some(next_ids) => {
                for next_id in next_ids {
                    lines.push(format!("  {} --> {next_id}", step.id));
                }
            }
            None => lines.push(format!("  {} --> End", step.id)),
        }
    }

    lines.push("  End([Fin del Procedimiento]):::start".to_string());
    lines.extend(CLASS_DEFS.iter().map(|class_def| format!("  {class_def}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
