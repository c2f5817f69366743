//! Built-in registry and keyword set used when no config file is given.

use crate::domain::model::SourceEntry;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const DEFAULT_MAX_LISTINGS_PER_SOURCE: usize = 300;
pub const DEFAULT_COURTESY_DELAY_MS: u64 = 1000;
pub const DEFAULT_FILE_PREFIX: &str = "it_cyber_jobs";
pub const DEFAULT_OUTPUT_PATH: &str = ".";
pub const DEFAULT_ATS_DOMAINS: &[&str] = &["boards.greenhouse.io"];

// Bare "ai" is left out on purpose: far too noisy against job titles.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "security",
    "cyber",
    "information security",
    "infosec",
    "iam",
    "risk",
    "grc",
    "compliance",
    "privacy",
    "security analyst",
    "security engineer",
    "trust",
    "vulnerability",
    "threat",
    "soc",
];

const DEFAULT_SOURCES: &[(&str, &str)] = &[
    ("Amplify", "https://boards.greenhouse.io/amplify"),
    ("Instructure", "https://boards.greenhouse.io/instructure"),
    ("Khan Academy", "https://boards.greenhouse.io/khanacademy"),
    ("Duolingo", "https://boards.greenhouse.io/duolingo"),
    ("2U / edX", "https://boards.greenhouse.io/2u"),
    ("Quizlet", "https://boards.greenhouse.io/quizlet"),
    ("Chegg", "https://boards.greenhouse.io/chegg"),
    ("Coursera", "https://boards.greenhouse.io/coursera"),
    ("Pearson", "https://pearson.jobs/search/?q=&location=remote"),
    ("HMH (Houghton Mifflin Harcourt)", "https://careers.hmhco.com/jobs"),
    ("ETS", "https://etscareers.searchsoft.net/PD/VacancyList.aspx"),
    ("Curriculum Associates", "https://www.curriculumassociates.com/about/careers"),
    ("NWEA", "https://www.nwea.org/about/careers/"),
];

pub fn default_sources() -> Vec<SourceEntry> {
    DEFAULT_SOURCES
        .iter()
        .map(|(name, url)| SourceEntry::new(*name, *url))
        .collect()
}

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

pub fn default_ats_domains() -> Vec<String> {
    DEFAULT_ATS_DOMAINS.iter().map(|d| d.to_string()).collect()
}
