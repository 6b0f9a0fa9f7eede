//! Progress tasks and the fixed phase table.
//!
//! # Invariants
//! - Exactly four phases exist; their declaration order is the display order.
//! - Seed tasks use ids `1..=12`; tasks created later use epoch-millis ids.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of one of the four fixed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Diagnostico,
    Planificacion,
    Implementacion,
    Evaluacion,
}

impl PhaseId {
    /// All phases in display order.
    pub const ALL: [PhaseId; 4] = [
        PhaseId::Diagnostico,
        PhaseId::Planificacion,
        PhaseId::Implementacion,
        PhaseId::Evaluacion,
    ];

    /// Declared display index (0-based).
    pub fn index(self) -> usize {
        match self {
            Self::Diagnostico => 0,
            Self::Planificacion => 1,
            Self::Implementacion => 2,
            Self::Evaluacion => 3,
        }
    }

    /// Stable wire id, identical to the serde form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Diagnostico => "diagnostico",
            Self::Planificacion => "planificacion",
            Self::Implementacion => "implementacion",
            Self::Evaluacion => "evaluacion",
        }
    }

    /// Parses a wire id; case-insensitive, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == normalized)
    }

    pub fn phase(self) -> &'static Phase {
        &PHASES[self.index()]
    }
}

impl Display for PhaseId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display record for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub id: PhaseId,
    pub name: &'static str,
    /// Accent color token used by the progress bar.
    pub color: &'static str,
    /// Icon token (`icon-<token>`).
    pub icon: &'static str,
}

pub const PHASES: [Phase; 4] = [
    Phase {
        id: PhaseId::Diagnostico,
        name: "Diagnóstico",
        color: "#2f6fb0",
        icon: "search",
    },
    Phase {
        id: PhaseId::Planificacion,
        name: "Planificación",
        color: "#7a4fb5",
        icon: "calendar",
    },
    Phase {
        id: PhaseId::Implementacion,
        name: "Implementación",
        color: "#d07a1f",
        icon: "gear",
    },
    Phase {
        id: PhaseId::Evaluacion,
        name: "Evaluación",
        color: "#2e8b57",
        icon: "chart",
    },
];

/// One progress item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub phase: PhaseId,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: i64, text: impl Into<String>, phase: PhaseId) -> Self {
        Self {
            id,
            text: text.into(),
            phase,
            completed: false,
        }
    }
}

const SEED: [(&str, PhaseId, bool); 12] = [
    ("Relevar indicadores de ausentismo", PhaseId::Diagnostico, true),
    ("Mapear consultorios por planta", PhaseId::Diagnostico, true),
    ("Entrevistar a coordinadores regionales", PhaseId::Diagnostico, false),
    ("Definir cronograma de exámenes periódicos", PhaseId::Planificacion, true),
    ("Asignar responsables por comité", PhaseId::Planificacion, false),
    ("Aprobar presupuesto de insumos", PhaseId::Planificacion, false),
    ("Publicar estructura en la intranet", PhaseId::Implementacion, false),
    ("Capacitar a enfermería en el nuevo registro", PhaseId::Implementacion, false),
    ("Migrar fichas clínicas al sistema", PhaseId::Implementacion, false),
    ("Medir adherencia a protocolos", PhaseId::Evaluacion, false),
    ("Encuesta de satisfacción de trabajadores", PhaseId::Evaluacion, false),
    ("Informe anual a gerencia", PhaseId::Evaluacion, false),
];

/// Hard-coded seed list used when nothing is stored yet.
pub fn seed_tasks() -> Vec<Task> {
    SEED.iter()
        .enumerate()
        .map(|(index, (text, phase, completed))| Task {
            id: index as i64 + 1,
            text: (*text).to_string(),
            phase: *phase,
            completed: *completed,
        })
        .collect()
}
