//! Recruiting prompt shared by every provider

/// Reply keys the model must echo back.
pub mod keys {
    pub const CANDIDATE_NAME: &str = "aday_ismi";
    pub const FIT_SCORE: &str = "uyum_puani";
    pub const MATCHED_SKILLS: &str = "bulunan_yetenekler";
    pub const MISSING_SKILLS: &str = "eksik_yetenekler";
    pub const EXPERIENCE_SUMMARY: &str = "deneyim_ozeti";
    pub const EDUCATION_SUMMARY: &str = "egitim_durumu";
    pub const RECOMMENDATION: &str = "karar_onerisi";
}

/// Render the analysis prompt. Both texts are embedded verbatim.
pub fn render_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        "{}\n\nJOB DESCRIPTION:\n{}\n\nCANDIDATE RESUME:\n{}\n\n{}",
        ROLE_PREAMBLE, job_description, resume_text, OUTPUT_INSTRUCTIONS
    )
}

const ROLE_PREAMBLE: &str = "You are an expert human resources and technical recruiting specialist. \
Compare the candidate resume below with the given job description in detail.";

const OUTPUT_INSTRUCTIONS: &str = r#"Return the result ONLY as valid JSON with exactly these keys:
- 'aday_ismi': (string, the candidate's name taken from the resume heading or the file name)
- 'uyum_puani': (integer, a fit score between 0 and 100)
- 'bulunan_yetenekler': (list of strings, skills the candidate has that match the job description)
- 'eksik_yetenekler': (list of strings, critical skills in the job description that the candidate lacks)
- 'deneyim_ozeti': (string, a short paragraph on how well the candidate's experience fits the role)
- 'egitim_durumu': (string, the candidate's education level and school)
- 'karar_onerisi': (string, one of "Görüşmeye Çağır", "Yedekte Tut" or "Reddet")

The output must be pure JSON and must not contain markdown formatting (```json)."#;
