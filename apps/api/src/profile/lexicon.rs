//! Skill Lexicon: the reference set of skill tokens used by profile
//! extraction and match scoring. Loaded once at startup, read-only afterwards.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{info, warn};

/// Built-in lexicon used when no skills file is configured or readable.
const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "PHP", "Go", "Rust", "Swift",
    "Kotlin", "TypeScript", "Scala", "R", "MATLAB", "Perl", "Shell Scripting", "PowerShell",
    // Web technologies
    "HTML", "CSS", "React", "Angular", "Vue.js", "Node.js", "Express.js", "Django", "Flask",
    "Spring Boot", "ASP.NET", "Laravel", "Bootstrap", "jQuery", "SASS", "LESS",
    // Databases
    "MySQL", "PostgreSQL", "MongoDB", "Redis", "SQLite", "Oracle", "SQL Server", "DynamoDB",
    "Cassandra", "Neo4j", "Elasticsearch", "Firebase",
    // Cloud & DevOps
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins", "GitLab CI", "Terraform",
    "Ansible", "Chef", "Puppet", "Nagios", "Prometheus", "Grafana",
    // Data science & ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Scikit-learn", "Pandas",
    "NumPy", "Matplotlib", "Seaborn", "Jupyter", "Apache Spark", "Hadoop", "Tableau", "Power BI",
    // Mobile
    "Android", "iOS", "React Native", "Flutter", "Xamarin", "Ionic",
    // Version control & tools
    "Git", "GitHub", "GitLab", "Bitbucket", "SVN", "Jira", "Confluence", "Slack", "Trello",
    // Soft skills
    "Project Management", "Agile", "Scrum", "Leadership", "Communication", "Problem Solving",
    "Team Collaboration", "Time Management", "Critical Thinking", "Adaptability",
    // Other
    "REST API", "GraphQL", "Microservices", "Blockchain", "IoT", "Cybersecurity", "Linux",
    "Windows Server", "Networking", "System Administration",
];

#[derive(Debug, Clone)]
pub struct SkillLexicon {
    skills: Vec<String>,
    lowered: Vec<String>,
}

impl SkillLexicon {
    /// Builds a lexicon from raw entries: trimmed, blanks dropped, first
    /// spelling kept among case-insensitive duplicates.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();
        let mut lowered = Vec::new();

        for entry in entries {
            let skill = entry.as_ref().trim();
            if skill.is_empty() {
                continue;
            }
            let lower = skill.to_lowercase();
            if seen.insert(lower.clone()) {
                skills.push(skill.to_string());
                lowered.push(lower);
            }
        }

        Self { skills, lowered }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }

    /// Loads a JSON array of skill names from `path`.
    ///
    /// Never fails: a missing, unreadable, malformed or empty file falls back
    /// to the built-in list.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Skills database {} not found, using built-in lexicon",
                    path.display()
                );
                return Self::builtin();
            }
            Err(e) => {
                warn!(
                    "Could not read skills database {}: {e}. Using built-in lexicon",
                    path.display()
                );
                return Self::builtin();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(entries) => {
                let lexicon = Self::new(entries);
                if lexicon.is_empty() {
                    warn!(
                        "Skills database {} has no usable entries, using built-in lexicon",
                        path.display()
                    );
                    return Self::builtin();
                }
                info!(
                    "Loaded {} skills from {}",
                    lexicon.len(),
                    path.display()
                );
                lexicon
            }
            Err(e) => {
                warn!(
                    "Invalid JSON in skills database {}: {e}. Using built-in lexicon",
                    path.display()
                );
                Self::builtin()
            }
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.skills
    }

    /// `(canonical, lowercase)` pairs in lexicon order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skills
            .iter()
            .map(String::as_str)
            .zip(self.lowered.iter().map(String::as_str))
    }

    /// Case-insensitive lookup returning the lexicon's own spelling.
    pub fn canonical(&self, skill: &str) -> Option<&str> {
        let needle = skill.trim().to_lowercase();
        self.lowered
            .iter()
            .position(|l| *l == needle)
            .map(|i| self.skills[i].as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillLexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_lexicon_is_deduplicated() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.len(), DEFAULT_SKILLS.len());
        assert!(lexicon.canonical("python").is_some());
        assert!(lexicon.canonical("Node.js").is_some());
    }

    #[test]
    fn test_new_trims_and_drops_case_duplicates() {
        let lexicon = SkillLexicon::new(["  Rust ", "rust", "", "Go", "GO"]);
        assert_eq!(lexicon.entries(), &["Rust".to_string(), "Go".to_string()]);
    }

    #[test]
    fn test_canonical_returns_lexicon_spelling() {
        let lexicon = SkillLexicon::builtin();
        assert_eq!(lexicon.canonical("postgresql"), Some("PostgreSQL"));
        assert_eq!(lexicon.canonical("COBOL"), None);
    }

    #[test]
    fn test_load_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Rust", "Tokio", "Axum"]"#).unwrap();

        let lexicon = SkillLexicon::load(file.path());
        assert_eq!(lexicon.len(), 3);
        assert!(lexicon.canonical("tokio").is_some());
    }

    #[test]
    fn test_load_missing_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let lexicon = SkillLexicon::load(&dir.path().join("nope.json"));
        assert_eq!(lexicon.len(), SkillLexicon::builtin().len());
    }

    #[test]
    fn test_load_malformed_file_uses_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let lexicon = SkillLexicon::load(file.path());
        assert!(lexicon.canonical("Python").is_some());
    }

    #[test]
    fn test_load_empty_array_uses_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["", "   "]"#).unwrap();

        let lexicon = SkillLexicon::load(file.path());
        assert!(!lexicon.is_empty());
    }
}
