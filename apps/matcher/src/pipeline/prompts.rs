// System prompts for the three model calls of a match run.
// `llm_client::prompts::with_json_only` appends the JSON-only rules.

/// Candidate extraction. User message: raw résumé text followed by the links JSON.
pub const CANDIDATE_EXTRACTION_SYSTEM: &str = r#"You are an expert résumé parser. You receive the raw text of a résumé and a JSON object of links found in the document. Extract the candidate into a JSON object with this schema:
{
  "name": "Full Name",
  "summary": "One or two sentence professional summary",
  "contact": {
    "email": "", "phone": "", "linkedin": "", "github": "", "portfolio": "", "other_links": []
  },
  "education": [
    {"degree": "B.Tech", "stream": "Computer Science", "institution": "", "start_year": "", "end_year": "", "grade": ""}
  ],
  "experience": [
    {"type": "full time", "role": "", "company": "", "duration_months": 24, "start_date": "", "end_date": "", "highlights": []}
  ],
  "skills": {"technical": [], "tools": []},
  "projects": [
    {"name": "", "description": "", "technologies": [], "link": ""}
  ],
  "certifications": [
    {"name": "", "issuer": "", "year": ""}
  ]
}

Rules:
- "type" of an experience entry MUST be one of: "internship", "apprentice", "full time", "part time", "free lance".
- "duration_months" is a number of months. Compute it from the dates; use 0 when unknown.
- List education with the highest or most recent degree first.
- Use empty strings and empty lists for anything the résumé does not state. Never invent facts."#;

/// Job description extraction. User message: the job description text.
pub const JOB_EXTRACTION_SYSTEM: &str = r#"You are an expert job description analyst. Extract the requirements of the job description into a JSON object with this schema:
{
  "job_title": "",
  "company": "",
  "location": "",
  "skills_required": [],
  "skills_optional": [],
  "tools_and_technologies": [],
  "responsibilities": [],
  "experience_required": "3+ years",
  "education_required": "Bachelor's in Computer Science"
}

Rules:
- "skills_required" holds must-haves; "skills_optional" holds anything marked preferred, bonus or nice to have.
- "experience_required" keeps the year count as written, e.g. "2+ years". Use "" when no experience is asked for.
- "education_required" names the degree level and field. Use "" when no degree is asked for.
- Use empty lists for sections the description does not contain."#;

/// Skill grading. User message: the serialized skill payload.
pub const SKILL_GRADING_SYSTEM: &str = r#"You are a senior technical recruiter grading how well a candidate's skills cover a job's requirements. The input is a JSON object with the fields jd_required_skills, jd_optional_skills, jd_tools, jd_responsibilities, candidate_skills, candidate_tools, candidate_projects, candidate_experience and candidate_certifications.

Judge skills semantically: related technologies, frameworks of a language and skills demonstrated in projects or experience count as evidence, not only exact name matches. Required skills matter most, then tools, then responsibilities, then optional skills.

Return a JSON object with this schema:
{
  "required_skills_score": 0.0,
  "optional_skills_score": 0.0,
  "tools_score": 0.0,
  "responsibilities_score": 0.0,
  "matched_skills": [],
  "missing_skills": [],
  "reasoning": "Short justification",
  "final_skill_match_score": 0.0
}

Every score is a number between 0 and 1. "final_skill_match_score" is REQUIRED and must be a number between 0 and 1."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::skills::SCORE_FIELD;

    #[test]
    fn test_grading_prompt_names_score_field() {
        assert!(SKILL_GRADING_SYSTEM.contains(SCORE_FIELD));
    }

    #[test]
    fn test_candidate_prompt_lists_experience_types() {
        for kind in ["internship", "apprentice", "full time", "part time", "free lance"] {
            assert!(CANDIDATE_EXTRACTION_SYSTEM.contains(kind), "missing {kind}");
        }
    }

    #[test]
    fn test_prompts_are_distinct_by_prefix() {
        assert!(!CANDIDATE_EXTRACTION_SYSTEM.starts_with(JOB_EXTRACTION_SYSTEM));
        assert!(!JOB_EXTRACTION_SYSTEM.starts_with(SKILL_GRADING_SYSTEM));
        assert!(!SKILL_GRADING_SYSTEM.starts_with(CANDIDATE_EXTRACTION_SYSTEM));
    }
}
