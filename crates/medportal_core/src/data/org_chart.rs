//! Medical department org chart.

use crate::model::org::{OrgGroup, Region, Sector, Staff};

pub const ORG_GROUPS: &[OrgGroup] = &[
    OrgGroup {
        id: "direccion",
        title: "Dirección Médica",
        subtitle: "Coordinación general del servicio",
        leader: "Dra. Carolina Fuentes",
        icon: "stethoscope",
        regions: &[
            Region {
                id: "direccion-central",
                name: "Casa Central",
                sectors: &[
                    Sector {
                        name: "Gerencia médica",
                        staff: &[
                            Staff::coordinator("Dra. Carolina Fuentes", "Directora"),
                            Staff::with_role("Marcela Rojas", "Asistente"),
                        ],
                    },
                    Sector {
                        name: "Calidad y auditoría",
                        staff: &[
                            Staff::with_role("Dr. Ignacio Pavez", "Auditor"),
                            Staff::member("Paula Contreras"),
                        ],
                    },
                ],
            },
            Region {
                id: "direccion-apoyo",
                name: "Unidades de apoyo",
                sectors: &[
                    Sector {
                        name: "Farmacia",
                        staff: &[Staff::coordinator("QF. Andrea Salinas", "Jefa")],
                    },
                    Sector {
                        name: "Archivo clínico",
                        staff: &[],
                    },
                ],
            },
        ],
    },
    OrgGroup {
        id: "norte",
        title: "Zona Norte",
        subtitle: "Faenas y plantas del norte",
        leader: "Dr. Rodrigo Aravena",
        icon: "map",
        regions: &[
            Region {
                id: "norte-antofagasta",
                name: "Antofagasta",
                sectors: &[
                    Sector {
                        name: "Policlínico planta",
                        staff: &[
                            Staff::coordinator("Dr. Rodrigo Aravena", "Coordinador"),
                            Staff::with_role("Valentina Muñoz", "Enfermera"),
                            Staff::with_role("Felipe Tapia", "TENS"),
                        ],
                    },
                    Sector {
                        name: "Salud ocupacional",
                        staff: &[Staff::with_role("Camila Olivares", "Prevencionista")],
                    },
                ],
            },
            Region {
                id: "norte-calama",
                name: "Calama",
                sectors: &[Sector {
                    name: "Policlínico faena",
                    staff: &[
                        Staff::with_role("Dr. Matías Herrera", "Médico"),
                        Staff::with_role("Javiera Soto", "Enfermera"),
                    ],
                }],
            },
        ],
    },
    OrgGroup {
        id: "sur",
        title: "Zona Sur",
        subtitle: "Centros de distribución y oficinas",
        leader: "Dra. Francisca Vidal",
        icon: "compass",
        regions: &[
            Region {
                id: "sur-concepcion",
                name: "Concepción",
                sectors: &[
                    Sector {
                        name: "Policlínico central",
                        staff: &[
                            Staff::coordinator("Dra. Francisca Vidal", "Coordinadora"),
                            Staff::with_role("Tomás Riquelme", "Kinesiólogo"),
                        ],
                    },
                    Sector {
                        name: "Salud mental",
                        staff: &[Staff::with_role("Ps. Daniela Castro", "Psicóloga")],
                    },
                ],
            },
            Region {
                id: "sur-puerto-montt",
                name: "Puerto Montt",
                sectors: &[Sector {
                    name: "Enfermería",
                    staff: &[Staff::member("Sebastián Godoy")],
                }],
            },
        ],
    },
];

pub fn org_groups() -> &'static [OrgGroup] {
    ORG_GROUPS
}

pub fn find_group(group_id: &str) -> Option<&'static OrgGroup> {
    ORG_GROUPS.iter().find(|group| group.id == group_id)
}

#[cfg(test)]
mod tests {
    use super::find_group;

    #[test]
    fn find_group_resolves_regions_and_counts_staff() {
        let direccion = find_group("direccion").unwrap();
        assert_eq!(direccion.staff_count(), 5);
        assert_eq!(
            direccion.region("direccion-apoyo").unwrap().name,
            "Unidades de apoyo"
        );
        assert!(direccion.region("norte-calama").is_none());
        assert_eq!(find_group("norte").unwrap().staff_count(), 6);
        assert!(find_group("oeste").is_none());
    }
}
