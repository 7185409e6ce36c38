//! Generates a deterministic sample response file (`sample_survey.xlsx`)
//! with the column layout the dashboard expects: consent question, identity
//! columns, 41 numbered questions, and a document-link column.

use rust_xlsxwriter::Workbook;

const CONSENT_COLUMN: &str = "Antes de comenzar la encuesta, es importante informarle que los datos proporcionados serán tratados de forma confidencial y utilizados únicamente para los fines del proyecto ELA4ATTRACT ¿Está de acuerdo con el tratamiento de sus datos para este propósito?";
const CONSENT_ACCEPTED: &str = "Sí, estoy de acuerdo";

const QUESTIONS: [&str; 41] = [
    "1- ¿Cuántos estudiantes de educación media hay a nivel nacional?",
    "2- ¿Cuántos estudiantes de educación media ingresan anualmente a la educación superior?",
    "3- ¿Qué porcentaje de estudiantes de educación media son mujeres?",
    "4- ¿Qué porcentaje de estudiantes de educación media opta por carreras STEM?",
    "5- ¿Cuántos estudiantes de pregrado tiene su universidad?",
    "6- ¿Cuántos estudiantes de pregrado están matriculados en carreras STEM?",
    "7- ¿Qué porcentaje de estudiantes de pregrado son mujeres?",
    "8- ¿Qué porcentaje de estudiantes de pregrado STEM son mujeres?",
    "9- ¿Cuál es la tasa de deserción en carreras STEM de su universidad?",
    "10- ¿Cuál es la duración promedio real de las carreras STEM?",
    "11- ¿Qué porcentaje de estudiantes de pregrado proviene de zonas rurales?",
    "12- ¿Realiza su universidad actividades de promoción de carreras STEM?",
    "13- ¿Qué tipo de actividades de promoción realiza?",
    "14- ¿Con qué frecuencia realiza actividades de promoción?",
    "15- ¿A qué público están dirigidas las actividades de promoción?",
    "16- ¿Cuántos colegios participan anualmente en las actividades de promoción?",
    "17- ¿Cuántos estudiantes participan anualmente en las actividades de promoción?",
    "18- ¿Colabora con otras instituciones en la promoción de carreras STEM?",
    "19- ¿Mide el impacto de las actividades de promoción?",
    "20- ¿Qué indicadores utiliza para medir el impacto?",
    "21- ¿Cuenta con presupuesto asignado para la promoción de carreras STEM?",
    "22- ¿Ofrece su universidad becas para estudiantes de carreras STEM?",
    "23- ¿Qué porcentaje de estudiantes STEM recibe apoyo financiero?",
    "24- ¿Qué tipos de apoyo financiero ofrece?",
    "25- ¿Existen apoyos financieros dirigidos específicamente a mujeres en STEM?",
    "26- ¿Realiza seguimiento a la permanencia de los estudiantes STEM?",
    "27- ¿Qué estrategias utiliza para evaluar la permanencia estudiantil?",
    "28- ¿Cuenta con programas de acompañamiento para estudiantes en riesgo?",
    "29- ¿Realiza actividades con perspectiva de género?",
    "30- ¿Qué actividades con perspectiva de género realiza?",
    "31- ¿Participa en redes o programas de mujeres en STEM?",
    "32- ¿Cuenta con una política institucional de género?",
    "33- ¿Existe un equipo dedicado a la promoción de carreras STEM?",
    "34- ¿Cuál es el promedio de años de experiencia del personal dedicado a las actividades de promoción de carreras STEM en su universidad?",
    "35- ¿Cuál es la edad promedio del personal dedicado a actividades de promoción de carreras STEM en su universidad?",
    "36- ¿Cuántas personas conforman el equipo dedicado a actividades de promoción de carreras STEM en su universidad?",
    "37- ¿Cuál es el porcentaje de mujeres dedicadas a actividades de promoción de carreras STEM en su universidad?",
    "38- ¿Qué formación tiene el personal dedicado a la promoción de carreras STEM?",
    "39- ¿El personal de promoción recibe capacitación periódica?",
    "40- ¿Desea recibir los resultados del estudio?",
    "41- Comentarios finales",
];

const UNIVERSITIES: [(&str, &str); 10] = [
    ("Colombia", "Universidad de los Andes"),
    ("Colombia", "Universidad Nacional de Colombia"),
    ("Colombia", "Universidad del Valle"),
    ("Perú", "Pontificia Universidad Católica del Perú"),
    ("Perú", "Universidad Nacional de Ingeniería"),
    ("México", "Universidad Nacional Autónoma de México"),
    ("México", "Instituto Politécnico Nacional"),
    ("Chile", "Universidad de Chile"),
    ("Chile", "Pontificia Universidad Católica de Chile"),
    ("Ecuador", "Escuela Politécnica Nacional"),
];

const YES_NO: [&str; 2] = ["Sí", "No"];

const EXPERIENCE_RANGES: [&str; 4] = [
    "Menos de 2 años",
    "Entre 2 y 5 años",
    "Entre 5 y 10 años",
    "Más de 10 años",
];

const AGE_RANGES: [&str; 4] = [
    "Menos de 30 años",
    "Entre 30 y 40 años",
    "Entre 40 y 50 años",
    "Más de 50 años",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }

    fn int_between(&mut self, low: i64, high: i64) -> i64 {
        low + (self.next_u64() % (high - low) as u64) as i64
    }
}

fn answer(rng: &mut SimpleRng, question_number: usize) -> Option<String> {
    // One in twelve cells left blank, like real form exports.
    if rng.next_f64() < 1.0 / 12.0 {
        return None;
    }
    let text = match question_number {
        1 | 2 => rng.int_between(100_000, 2_000_000).to_string(),
        5 | 6 | 16 | 17 => rng.int_between(500, 60_000).to_string(),
        3 | 4 | 7 | 8 | 9 | 11 | 23 | 37 => format!("{}%", rng.int_between(5, 70)),
        10 => format!("{} semestres", rng.int_between(10, 15)),
        13 => rng
            .pick(&["Ferias vocacionales", "Visitas a colegios", "Talleres y campamentos"])
            .to_string(),
        14 => rng.pick(&["Mensual", "Semestral", "Anual"]).to_string(),
        15 => rng
            .pick(&["Estudiantes de educación media", "Docentes", "Familias"])
            .to_string(),
        20 => rng
            .pick(&["Número de inscritos", "Encuestas de interés", "Matrícula STEM"])
            .to_string(),
        24 => rng
            .pick(&["Becas completas", "Becas parciales", "Créditos condonables"])
            .to_string(),
        27 => rng
            .pick(&["Encuestas periódicas", "Alertas tempranas", "Tutorías"])
            .to_string(),
        30 => rng
            .pick(&["Mentorías para mujeres", "Charlas de referentes", "Clubes de ciencia"])
            .to_string(),
        34 => rng.pick(&EXPERIENCE_RANGES).to_string(),
        35 => rng.pick(&AGE_RANGES).to_string(),
        36 => rng.int_between(1, 15).to_string(),
        38 => rng
            .pick(&["Profesional", "Especialización", "Maestría", "Doctorado"])
            .to_string(),
        41 => rng
            .pick(&[
                "Sin comentarios",
                "Gracias por la iniciativa",
                "Interesados en los resultados",
            ])
            .to_string(),
        _ => rng.pick(&YES_NO).to_string(),
    };
    Some(text)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    let mut header: Vec<String> = vec![
        "Marca temporal".to_string(),
        CONSENT_COLUMN.to_string(),
        "Nombre completo de quién coordina el diligenciamiento de la encuesta".to_string(),
        "Correo electrónico institucional".to_string(),
        "País".to_string(),
        "Universidad".to_string(),
    ];
    header.extend(QUESTIONS.iter().map(|q| q.to_string()));
    header.push("Enlace a los documentos".to_string());

    for (col, name) in header.iter().enumerate() {
        sheet
            .write_string(0, col as u16, name)
            .expect("Failed to write header");
    }

    let mut row: u32 = 1;
    for (country, university) in UNIVERSITIES {
        // A couple of responses per university, one dissent in the mix.
        let responses = rng.int_between(1, 4);
        for i in 0..responses {
            let consent = if row % 9 == 0 { "No estoy de acuerdo" } else { CONSENT_ACCEPTED };

            sheet
                .write_string(row, 0, format!("2024-06-{:02}", rng.int_between(1, 29)))
                .and_then(|s| s.write_string(row, 1, consent))
                .and_then(|s| s.write_string(row, 2, format!("Coordinación {university}")))
                .and_then(|s| {
                    s.write_string(row, 3, format!("contacto{i}@{}.edu", country.to_lowercase()))
                })
                .and_then(|s| s.write_string(row, 4, country))
                .and_then(|s| s.write_string(row, 5, university))
                .expect("Failed to write identity cells");

            for (q_idx, _) in QUESTIONS.iter().enumerate() {
                if let Some(text) = answer(&mut rng, q_idx + 1) {
                    sheet
                        .write_string(row, (6 + q_idx) as u16, text)
                        .expect("Failed to write answer");
                }
            }

            if rng.next_f64() < 0.7 {
                sheet
                    .write_string(
                        row,
                        (6 + QUESTIONS.len()) as u16,
                        format!(
                            "https://drive.example.org/{}/evidencias.pdf",
                            university.to_lowercase().replace(' ', "-")
                        ),
                    )
                    .expect("Failed to write link");
            }

            row += 1;
        }
    }

    let output_path = "sample_survey.xlsx";
    workbook.save(output_path).expect("Failed to save workbook");

    println!("Wrote {} responses to {output_path}", row - 1);
}
