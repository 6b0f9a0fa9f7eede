//! Committee document link table.

use crate::model::committee::{Committee, CommitteeCatalog, DocumentLinks};

const fn links(folder: &'static str, doc: &'static str, ppt: &'static str) -> DocumentLinks {
    DocumentLinks { folder, doc, ppt }
}

pub const COMMITTEES: &[Committee] = &[
    Committee {
        id: "calidad",
        name: "Comité de Calidad",
        max_slots: None,
        slots: &[
            (
                1,
                links(
                    "https://docs.example.org/calidad/p1",
                    "https://docs.example.org/calidad/p1/informe",
                    "https://docs.example.org/calidad/p1/presentacion",
                ),
            ),
            (
                2,
                links(
                    "https://docs.example.org/calidad/p2",
                    "https://docs.example.org/calidad/p2/informe",
                    "https://docs.example.org/calidad/p2/presentacion",
                ),
            ),
            (
                3,
                links("https://docs.example.org/calidad/p3", "", ""),
            ),
        ],
    },
    Committee {
        id: "docencia",
        name: "Comité de Docencia",
        max_slots: Some(5),
        slots: &[(
            1,
            links(
                "https://docs.example.org/docencia/p1",
                "https://docs.example.org/docencia/p1/programa",
                "https://docs.example.org/docencia/p1/clase",
            ),
        )],
    },
    Committee {
        id: "farmacia",
        name: "Comité de Farmacia",
        max_slots: Some(3),
        slots: &[
            (
                1,
                links(
                    "https://docs.example.org/farmacia/p1",
                    "https://docs.example.org/farmacia/p1/arsenal",
                    "",
                ),
            ),
            (
                2,
                links(
                    "https://docs.example.org/farmacia/p2",
                    "",
                    "https://docs.example.org/farmacia/p2/presentacion",
                ),
            ),
        ],
    },
    Committee {
        id: "infecciones",
        name: "Comité de Infecciones",
        max_slots: None,
        slots: &[],
    },
];

/// Catalog over the built-in committee table with no overrides.
pub fn builtin_catalog() -> CommitteeCatalog {
    CommitteeCatalog::new(COMMITTEES)
}
