//! Fixed provisioning roster.

/// One person to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonRecord {
    pub full_name: &'static str,
    pub email: &'static str,
    /// National id as written on staff records, punctuation included.
    pub national_id: &'static str,
    pub position: &'static str,
}

impl PersonRecord {
    pub const fn new(
        full_name: &'static str,
        email: &'static str,
        national_id: &'static str,
        position: &'static str,
    ) -> Self {
        Self {
            full_name,
            email,
            national_id,
            position,
        }
    }
}

pub const ROSTER: &[PersonRecord] = &[
    PersonRecord::new("Ana Rojas", "ana.rojas@example.org", "10.001.003-8", "Médico del trabajo"),
    PersonRecord::new("Bruno Muñoz", "bruno.munoz@example.org", "10.438.222-3", "Enfermera coordinadora"),
    PersonRecord::new("Carla Soto", "carla.soto@example.org", "10.875.441-9", "Paramédico"),
    PersonRecord::new("Diego Contreras", "diego.contreras@example.org", "11.312.660-4", "Técnico en enfermería"),
    PersonRecord::new("Elena Silva", "elena.silva@example.org", "11.749.879-4", "Kinesiólogo"),
    PersonRecord::new("Felipe Martínez", "felipe.martinez@example.org", "12.187.098-3", "Psicóloga laboral"),
    PersonRecord::new("Gabriela Sepúlveda", "gabriela.sepulveda@example.org", "12.624.317-0", "Químico farmacéutico"),
    PersonRecord::new("Héctor Morales", "hector.morales@example.org", "13.061.536-8", "Administrativo"),
    PersonRecord::new("Isabel Rodríguez", "isabel.rodriguez@example.org", "13.498.755-3", "Médico del trabajo"),
    PersonRecord::new("Javier López", "javier.lopez@example.org", "13.935.974-7", "Enfermera coordinadora"),
    PersonRecord::new("Karina Fuentes", "karina.fuentes@example.org", "14.373.193-6", "Paramédico"),
    PersonRecord::new("Luis Hernández", "luis.hernandez@example.org", "14.810.412-3", "Técnico en enfermería"),
    PersonRecord::new("María Torres", "maria.torres@example.org", "15.247.631-0", "Kinesiólogo"),
    PersonRecord::new("Nicolás Araya", "nicolas.araya@example.org", "15.684.850-6", "Psicóloga laboral"),
    PersonRecord::new("Olga Flores", "olga.flores@example.org", "16.122.069-8", "Químico farmacéutico"),
    PersonRecord::new("Pablo Espinoza", "pablo.espinoza@example.org", "16.559.288-3", "Administrativo"),
    PersonRecord::new("Rocío Valenzuela", "rocio.valenzuela@example.org", "16.996.507-2", "Médico del trabajo"),
    PersonRecord::new("Sergio Castillo", "sergio.castillo@example.org", "17.433.726-8", "Enfermera coordinadora"),
    PersonRecord::new("Teresa Tapia", "teresa.tapia@example.org", "17.870.945-3", "Paramédico"),
    PersonRecord::new("Ulises Reyes", "ulises.reyes@example.org", "18.308.164-0", "Técnico en enfermería"),
    PersonRecord::new("Valentina Gutiérrez", "valentina.gutierrez@example.org", "18.745.383-6", "Kinesiólogo"),
    PersonRecord::new("Walter Castro", "walter.castro@example.org", "19.182.602-7", "Psicóloga laboral"),
    PersonRecord::new("Ximena Pizarro", "ximena.pizarro@example.org", "19.619.821-0", "Químico farmacéutico"),
    PersonRecord::new("Yolanda Álvarez", "yolanda.alvarez@example.org", "20.057.040-5", "Administrativo"),
    PersonRecord::new("Zoe Vásquez", "zoe.vasquez@example.org", "20.494.259-5", "Médico del trabajo"),
    PersonRecord::new("Andrés Sánchez", "andres.sanchez@example.org", "20.931.478-9", "Enfermera coordinadora"),
    PersonRecord::new("Beatriz Fernández", "beatriz.fernandez@example.org", "21.368.697-6", "Paramédico"),
    PersonRecord::new("Cristián Ramírez", "cristian.ramirez@example.org", "21.805.916-3", "Técnico en enfermería"),
    PersonRecord::new("Daniela Carrasco", "daniela.carrasco@example.org", "22.243.135-2", "Kinesiólogo"),
    PersonRecord::new("Esteban Gómez", "esteban.gomez@example.org", "22.680.354-8", "Psicóloga laboral"),
    PersonRecord::new("Fernanda Cortés", "fernanda.cortes@example.org", "23.117.573-3", "Químico farmacéutico"),
    PersonRecord::new("Gonzalo Herrera", "gonzalo.herrera@example.org", "23.554.792-9", "Administrativo"),
    PersonRecord::new("Hilda Núñez", "hilda.nunez@example.org", "23.992.011-K", "Médico del trabajo"),
];

#[cfg(test)]
mod tests {
    use super::ROSTER;
    use std::collections::BTreeSet;

    #[test]
    fn roster_emails_are_unique() {
        let emails: BTreeSet<_> = ROSTER.iter().map(|person| person.email).collect();
        assert_eq!(emails.len(), ROSTER.len());
        assert_eq!(ROSTER.len(), 33);
    }
}
