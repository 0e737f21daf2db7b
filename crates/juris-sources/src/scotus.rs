use anyhow::Result;
use chrono::Datelike;
use juris_core::source::LandmarkLookup;
use juris_core::types::LandmarkCase;
use regex::Regex;
use tracing::warn;

const BASE: &str = "https://www.supremecourt.gov";

/// Client for supremecourt.gov. The site has no search API, so this client
/// does two unrelated things: scrape the slip-opinion and oral-argument
/// listing pages, and serve the built-in landmark table for topic lookups.
pub struct ScotusClient {
    http: reqwest::Client,
}

/// A slip opinion scraped from the opinions listing page.
#[derive(Debug, Clone)]
pub struct SlipOpinion {
    pub term: String,
    pub pdf_url: String,
}

/// An oral argument recording scraped from the argument-audio page.
#[derive(Debug, Clone)]
pub struct OralArgument {
    pub term: String,
    pub audio_url: String,
}

impl ScotusClient {
    pub fn new(timeout_s: u64) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("juris/0.1 (legal research agent)")
                .timeout(std::time::Duration::from_secs(timeout_s))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Slip opinions for a term. Terms start in October, so before October
    /// the current term is still last year's.
    pub async fn recent_opinions(&self, term: Option<&str>) -> Result<Vec<SlipOpinion>> {
        let term = term.map(str::to_string).unwrap_or_else(current_term);
        let url = format!("{BASE}/opinions/slipopinion/{term}");
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            warn!(status = %resp.status(), "scotus opinions page");
            return Ok(Vec::new());
        }
        let html = resp.text().await?;
        Ok(parse_slip_opinions(&html, &term))
    }

    pub async fn oral_arguments(&self, term: Option<&str>) -> Result<Vec<OralArgument>> {
        let term = term.map(str::to_string).unwrap_or_else(current_term);
        let url = format!("{BASE}/oral_arguments/argument_audio/{term}");
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Ok(Vec::new());
        }
        let html = resp.text().await?;
        Ok(parse_oral_arguments(&html, &term))
    }
}

impl LandmarkLookup for ScotusClient {
    fn topic_lookup(&self, text: &str, max_results: usize) -> Vec<LandmarkCase> {
        landmark_topic_lookup(text, max_results)
    }
}

fn current_term() -> String {
    let now = chrono::Local::now();
    let year = if now.month() >= 10 {
        now.year()
    } else {
        now.year() - 1
    };
    year.to_string()
}

/// Extract slip-opinion PDF links from the listing page.
pub fn parse_slip_opinions(html: &str, term: &str) -> Vec<SlipOpinion> {
    let Ok(re) = Regex::new(r#"href="(/opinions/\d+pdf/[^"]+)""#) else {
        return Vec::new();
    };
    re.captures_iter(html)
        .take(10)
        .map(|c| SlipOpinion {
            term: term.to_string(),
            pdf_url: format!("{BASE}{}", &c[1]),
        })
        .collect()
}

/// Extract argument audio links from the listing page.
pub fn parse_oral_arguments(html: &str, term: &str) -> Vec<OralArgument> {
    let Ok(re) = Regex::new(r#"href="(/oral_arguments/audio/\d+/[^"]+)""#) else {
        return Vec::new();
    };
    re.captures_iter(html)
        .take(10)
        .map(|c| OralArgument {
            term: term.to_string(),
            audio_url: format!("{BASE}{}", &c[1]),
        })
        .collect()
}

/// Landmark entries whose topic keyword appears in `text`.
///
/// This backfills results the search sources miss: the fetcher runs each
/// requested case name through here and keeps entries the name matcher
/// confirms.
pub fn landmark_topic_lookup(text: &str, max_results: usize) -> Vec<LandmarkCase> {
    let text = text.to_lowercase();
    let mut hits = Vec::new();
    for (keyword, cases) in LANDMARK_CASES {
        if text.contains(keyword) {
            hits.extend(cases.iter().map(|(name, citation, topic)| LandmarkCase {
                case_name: (*name).to_string(),
                citation: (*citation).to_string(),
                topic: (*topic).to_string(),
            }));
        }
    }
    hits.truncate(max_results);
    hits
}

// ── Landmark table ───────────────────────────────────────────────────────
// Landmark constitutional cases by topic keyword. Read-only seed data,
// (keyword, [(case name, citation, why it matters)]).

const LANDMARK_CASES: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "fourth amendment",
        &[
            ("Carpenter v. United States", "585 U.S. 296 (2018)", "Cell phone location data is protected by 4th Amendment"),
            ("Riley v. California", "573 U.S. 373 (2014)", "Police must get warrant to search cell phones"),
            ("Katz v. United States", "389 U.S. 347 (1967)", "Established reasonable expectation of privacy test"),
            ("Terry v. Ohio", "392 U.S. 1 (1968)", "Stop and frisk standards"),
            ("Mapp v. Ohio", "367 U.S. 643 (1961)", "Exclusionary rule applies to states"),
        ],
    ),
    (
        "first amendment",
        &[
            ("Tinker v. Des Moines", "393 U.S. 503 (1969)", "Student free speech in schools"),
            ("New York Times Co. v. Sullivan", "376 U.S. 254 (1964)", "Actual malice standard for public figures"),
            ("Brandenburg v. Ohio", "395 U.S. 444 (1969)", "Imminent lawless action test"),
            ("Citizens United v. FEC", "558 U.S. 310 (2010)", "Corporate political speech"),
            ("Snyder v. Phelps", "562 U.S. 443 (2011)", "Westboro Baptist Church protests protected"),
        ],
    ),
    (
        "equal protection",
        &[
            ("Brown v. Board of Education", "347 U.S. 483 (1954)", "School segregation unconstitutional"),
            ("Students for Fair Admissions v. Harvard", "600 U.S. 181 (2023)", "Race-conscious admissions unconstitutional"),
            ("Obergefell v. Hodges", "576 U.S. 644 (2015)", "Same-sex marriage is a fundamental right"),
            ("Loving v. Virginia", "388 U.S. 1 (1967)", "Interracial marriage bans unconstitutional"),
        ],
    ),
    (
        "due process",
        &[
            ("Mathews v. Eldridge", "424 U.S. 319 (1976)", "Three-factor balancing test for procedural due process"),
            ("Gideon v. Wainwright", "372 U.S. 335 (1963)", "Right to counsel in criminal cases"),
            ("Miranda v. Arizona", "384 U.S. 436 (1966)", "Miranda rights required before interrogation"),
            ("Roe v. Wade", "410 U.S. 113 (1973)", "Substantive due process and privacy (overruled by Dobbs)"),
            ("Dobbs v. Jackson", "597 U.S. 215 (2022)", "No constitutional right to abortion, overruling Roe"),
        ],
    ),
    (
        "qualified immunity",
        &[
            ("Harlow v. Fitzgerald", "457 U.S. 800 (1982)", "Established qualified immunity doctrine"),
            ("Pearson v. Callahan", "555 U.S. 223 (2009)", "Courts can skip clearly established analysis"),
            ("Kisela v. Hughes", "584 U.S. 100 (2018)", "High bar for defeating qualified immunity"),
        ],
    ),
    (
        "second amendment",
        &[
            ("District of Columbia v. Heller", "554 U.S. 570 (2008)", "Individual right to bear arms"),
            ("McDonald v. City of Chicago", "561 U.S. 742 (2010)", "2nd Amendment applies to states"),
            ("New York State Rifle & Pistol Assn. v. Bruen", "597 U.S. 1 (2022)", "Text, history, and tradition test for gun laws"),
        ],
    ),
    (
        "executive power",
        &[
            ("Youngstown Sheet & Tube Co. v. Sawyer", "343 U.S. 579 (1952)", "Limits on presidential power framework"),
            ("Trump v. Hawaii", "585 U.S. 667 (2018)", "Presidential authority over immigration"),
            ("Nixon v. United States", "418 U.S. 683 (1974)", "Executive privilege is not absolute"),
        ],
    ),
    (
        "section 1983",
        &[
            ("Monroe v. Pape", "365 U.S. 167 (1961)", "Section 1983 applies to state officials acting under color of law"),
            ("Monell v. Department of Social Services", "436 U.S. 658 (1978)", "Municipal liability under Section 1983"),
            ("Graham v. Connor", "490 U.S. 386 (1989)", "Objective reasonableness standard for excessive force"),
        ],
    ),
    (
        "privacy",
        &[
            ("Griswold v. Connecticut", "381 U.S. 479 (1965)", "Right to privacy in marital relations"),
            ("Carpenter v. United States", "585 U.S. 296 (2018)", "Digital privacy and cell phone tracking"),
            ("Riley v. California", "573 U.S. 373 (2014)", "Cell phone search requires warrant"),
        ],
    ),
    (
        "digital",
        &[
            ("Carpenter v. United States", "585 U.S. 296 (2018)", "Cell-site location information protected"),
            ("Riley v. California", "573 U.S. 373 (2014)", "Warrantless cell phone search unconstitutional"),
            ("United States v. Jones", "565 U.S. 400 (2012)", "GPS tracking constitutes a search"),
        ],
    ),
];
