use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use juris_core::config::Config;
use juris_core::types::SynthesisReport;
use juris_pipeline::fetcher::CaseFetcher;
use juris_pipeline::gemini::GeminiClient;
use juris_pipeline::identifier::Identifier;
use juris_pipeline::synthesizer::Synthesizer;
use juris_sources::congress::CongressClient;
use juris_sources::courtlistener::CourtListenerClient;
use juris_sources::scotus::ScotusClient;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "juris", about = "Constitutional law research agent", version)]
struct Args {
    /// Legal question to research; omit for an interactive session.
    question: Option<String>,

    /// Directory where research reports are written.
    #[arg(long)]
    output_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "juris=warn".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let gemini = Arc::new(GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
        config.gemini_timeout_s,
    ));
    let courtlistener = CourtListenerClient::new(&config.courtlistener_token, config.source_timeout_s);
    let congress = CongressClient::new(&config.congress_api_key, config.source_timeout_s);
    let scotus = ScotusClient::new(config.source_timeout_s);

    banner();

    let mut missing = Vec::new();
    if !gemini.is_configured() {
        missing.push("GEMINI_API_KEY");
    }
    if !courtlistener.is_configured() {
        missing.push("COURTLISTENER_API_TOKEN");
    }
    if !congress.is_configured() {
        missing.push("CONGRESS_API_KEY");
    }
    if !missing.is_empty() {
        println!("\n  {}", format!("⚠ Missing: {}", missing.join(", ")).yellow());
        println!("  {}", "Add them to .env (see .env.example)".yellow());
        if missing.contains(&"GEMINI_API_KEY") {
            println!("  {}", "GEMINI_API_KEY is required for this tool to work.".yellow());
            return Ok(());
        }
    }

    let identifier = Identifier::new(Arc::clone(&gemini));
    let fetcher = CaseFetcher::new(Arc::new(courtlistener), Arc::new(congress), Arc::new(scotus))
        .with_max_concurrent(config.max_concurrent_fetches);
    let synthesizer = Synthesizer::new(Arc::clone(&gemini));

    if let Some(question) = args.question {
        research(&question, &identifier, &fetcher, &synthesizer, &config.output_dir).await;
        return Ok(());
    }

    loop {
        println!("\n  {}", "Ask a legal question (or 'quit'):".cyan());
        print!("  > ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\n  {}", "Goodbye!".dimmed());
            break;
        }

        research(question, &identifier, &fetcher, &synthesizer, &config.output_dir).await;
    }

    Ok(())
}

/// The three-step pipeline for one question.
async fn research(
    question: &str,
    identifier: &Identifier,
    fetcher: &CaseFetcher,
    synthesizer: &Synthesizer,
    output_dir: &str,
) {
    println!(
        "\n  {}",
        "[1/3] Identifying relevant cases and statutes...".dimmed()
    );
    let targets = identifier.identify(question).await;

    if !targets.cases.is_empty() {
        println!(
            "  {}",
            format!("Found {} cases to research:", targets.cases.len()).green()
        );
        for name in &targets.cases {
            println!("    {}", format!("• {name}").dimmed());
        }
    }
    if !targets.statutes.is_empty() {
        println!(
            "  {}",
            format!("Found {} statutes to research:", targets.statutes.len()).green()
        );
        for name in &targets.statutes {
            println!("    {}", format!("• {name}").dimmed());
        }
    }
    if targets.is_empty() {
        println!(
            "  {}",
            "Couldn't identify specific cases. Try rephrasing.".yellow()
        );
        return;
    }

    println!(
        "\n  {}",
        "[2/3] Fetching from CourtListener, SCOTUS, Congress.gov...".dimmed()
    );
    let fetched = fetcher
        .fetch(&targets.cases, &targets.statutes, &targets.search_queries)
        .await;
    println!(
        "  {}",
        format!(
            "Retrieved: {} cases, {} statutes",
            fetched.cases.len(),
            fetched.statutes.len()
        )
        .green()
    );

    println!("\n  {}", "[3/3] Synthesizing answer...".dimmed());
    let report = synthesizer.synthesize(question, &fetched).await;

    match save_report(output_dir, question, &report) {
        Ok(path) => println!("\n  {}", format!("Saved: {path}").dimmed()),
        Err(e) => println!("  {}", format!("Could not save report: {e}").yellow()),
    }

    display(&report);
}

fn banner() {
    let bar = "═".repeat(70);
    println!("\n{}", bar.blue().bold());
    println!("{}", "  ⚖️  Constitutional Law Research Agent".blue().bold());
    println!(
        "{}",
        "  Gemini → CourtListener + SCOTUS + Congress.gov → Gemini".dimmed()
    );
    println!("{}", bar.blue().bold());
}

fn display(report: &SynthesisReport) {
    let line = "─".repeat(70);

    println!("\n{}", line.yellow().bold());
    println!("{}", "  💡 TLDR".yellow().bold());
    println!("{}", line.yellow().bold());
    let tldr = if report.tldr.is_empty() {
        "No summary available."
    } else {
        &report.tldr
    };
    println!("{}", wrap(tldr, 2));
    println!("{}", line.yellow().bold());

    if !report.key_cases.is_empty() {
        println!("\n{}", "  ⚖️  KEY CASES".cyan().bold());
        println!("{}", format!("  {line}").dimmed());
        println!("{}", wrap(&report.key_cases, 2));
    }

    if !report.statutes.is_empty() {
        println!("\n{}", "  📜 RELEVANT STATUTES".cyan().bold());
        println!("{}", format!("  {line}").dimmed());
        println!("{}", wrap(&report.statutes, 2));
    }

    if !report.answer.is_empty() {
        println!("\n{}", "  📋 ANSWER".green().bold());
        println!("{}", format!("  {line}").dimmed());
        println!("{}", wrap(&report.answer, 2));
    }

    if !report.gaps.is_empty() {
        println!("\n{}", "  🔍 GAPS IN THIS RESEARCH".dimmed());
        println!("{}", format!("  {line}").dimmed());
        println!("{}", wrap(&report.gaps, 2));
    }

    println!("\n{}", format!("  {line}").dimmed());
    println!("{}", "  ⚠️  For research only. Not legal advice.".dimmed());
}

/// Save question and report as JSON under `output_dir`. Returns the path.
fn save_report(output_dir: &str, question: &str, report: &SynthesisReport) -> Result<String> {
    std::fs::create_dir_all(output_dir)?;
    let now = chrono::Local::now();
    let filename = format!("{}_{}.json", now.format("%Y-%m-%d_%H-%M-%S"), slug(question));
    let path = std::path::Path::new(output_dir).join(filename);

    let payload = serde_json::json!({
        "question": question,
        "timestamp": now.to_rfc3339(),
        "tldr": report.tldr,
        "key_cases": report.key_cases,
        "statutes": report.statutes,
        "answer": report.answer,
        "gaps": report.gaps,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&payload)?)?;
    Ok(path.display().to_string())
}

/// Short sanitized string for use in filenames.
fn slug(s: &str) -> String {
    let kept: String = s
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .take(40)
        .collect();
    let joined = kept
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("_");
    if joined.is_empty() {
        "research".into()
    } else {
        joined
    }
}

/// Greedy-wrap each input line to a fixed width, indenting every output line.
fn wrap(text: &str, indent: usize) -> String {
    const WIDTH: usize = 68;
    let pad = " ".repeat(indent);
    let mut out = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut current = pad.clone();
        let mut len = 0usize;
        for word in line.split_whitespace() {
            let wlen = word.chars().count();
            if len > 0 && len + 1 + wlen > WIDTH {
                out.push(current);
                current = pad.clone();
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            current.push_str(word);
            len += wlen;
        }
        out.push(current);
    }
    out.join("\n")
}
