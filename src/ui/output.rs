use crate::error::{format_bytes, PhoneSiftError, UserFriendlyError};
use crate::export::ExportReport;
use crate::registry::{NumberStatus, RegistrySummary};
use crate::scanner::PhoneNumber;
use crate::session::{LoadOutcome, ResultRow, HELP_TEXT};
use console::{style, Emoji, Term};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

const HEART_FILLED: &str = "♥";
const HEART_EMPTY: &str = "♡";

const NO_NUMBERS_FOUND: &str = "No phone numbers found.";
const NO_FAVORITES: &str = "No numbers have been favorited yet.";
const NO_WORKING: &str = "No numbers marked 'WORKING' yet.";

pub struct OutputFormatter {
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors = match mode {
            OutputMode::Human => term.features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    pub fn print_prompt(&self) {
        if self.mode == OutputMode::Json {
            return;
        }

        let prompt = if self.use_colors {
            style("phonesift> ").cyan().bold().to_string()
        } else {
            "phonesift> ".to_string()
        };
        self.term.write_str(&prompt).ok();
        self.term.flush().ok();
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &PhoneSiftError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_load_outcome(&self, outcome: &LoadOutcome, rows: &[ResultRow]) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "load",
                    "path": outcome.path.display().to_string(),
                    "bytes": outcome.bytes,
                    "lossy": outcome.lossy,
                    "matches": outcome.extraction.total_matches,
                    "unique": outcome.extraction.len(),
                    "new": outcome.newly_registered,
                    "numbers": rows,
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
            _ => {
                if outcome.lossy {
                    self.warning("The file is not valid UTF-8; unreadable bytes were replaced.");
                }

                if outcome.extraction.is_empty() {
                    self.info(NO_NUMBERS_FOUND);
                    return;
                }

                self.success(&format!(
                    "Found {} number{} in {} ({} new, {})",
                    outcome.extraction.len(),
                    plural(outcome.extraction.len()),
                    outcome.path.display(),
                    outcome.newly_registered,
                    format_bytes(outcome.bytes)
                ));
                self.print_rows(rows);
            }
        }
    }

    pub fn print_result_rows(&self, title: &str, rows: &[ResultRow]) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "numbers",
                    "title": title,
                    "numbers": rows
                }));
            }
            _ => {
                if rows.is_empty() {
                    self.info(NO_NUMBERS_FOUND);
                    return;
                }
                self.print_header(title);
                self.print_rows(rows);
            }
        }
    }

    pub fn print_favorites(&self, favorites: &[(PhoneNumber, NumberStatus)]) {
        #[derive(Serialize)]
        struct Entry<'a> {
            index: usize,
            number: &'a PhoneNumber,
            status: NumberStatus,
        }

        match self.mode {
            OutputMode::Json => {
                let entries: Vec<Entry<'_>> = favorites
                    .iter()
                    .enumerate()
                    .map(|(i, (number, status))| Entry {
                        index: i + 1,
                        number,
                        status: *status,
                    })
                    .collect();
                self.print_json_object(&serde_json::json!({
                    "type": "favorites",
                    "numbers": entries
                }));
            }
            _ => {
                self.print_header("Favorites");
                if favorites.is_empty() {
                    println!("{}", NO_FAVORITES);
                    return;
                }
                for (i, (number, status)) in favorites.iter().enumerate() {
                    println!(
                        "{:>4}. {:<22} {}",
                        i + 1,
                        number.printable(),
                        self.styled_status(*status)
                    );
                }
            }
        }
    }

    pub fn print_working(&self, working: &[PhoneNumber]) {
        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "working",
                    "numbers": working
                }));
            }
            _ => {
                self.print_header("Working");
                if working.is_empty() {
                    println!("{}", NO_WORKING);
                    return;
                }
                for (i, number) in working.iter().enumerate() {
                    println!("{:>4}. {}", i + 1, number.printable());
                }
            }
        }
    }

    pub fn print_status_change(&self, number: &PhoneNumber, status: NumberStatus) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "status",
                "number": number,
                "status": status
            })),
            _ => println!(
                "{} is now {}",
                number.printable(),
                self.styled_status(status)
            ),
        }
    }

    pub fn print_favorite_change(&self, number: &PhoneNumber, favorite: bool) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "favorite",
                "number": number,
                "favorite": favorite
            })),
            _ => {
                let (heart, verb) = if favorite {
                    (HEART_FILLED, "added to")
                } else {
                    (HEART_EMPTY, "removed from")
                };
                println!("{} {} {} favorites", heart, number.printable(), verb);
            }
        }
    }

    pub fn print_unknown_reference(&self, reference: &str) {
        self.warning(&format!(
            "No number matches '{}'. Use a row number from `list` or a number shown there.",
            reference
        ));
    }

    pub fn print_export_report(&self, report: &ExportReport) {
        match self.mode {
            OutputMode::Json => {
                let mut value = serde_json::to_value(report).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("type".to_string(), "export".into());
                    object.insert(
                        "timestamp".to_string(),
                        chrono::Utc::now().to_rfc3339().into(),
                    );
                }
                self.print_json_object(&value);
            }
            _ => self.success(&format!(
                "Saved {} list to {} ({} entr{}, {} page{}, {})",
                report.kind,
                report.path.display(),
                report.entries,
                if report.entries == 1 { "y" } else { "ies" },
                report.pages,
                plural(report.pages),
                format_bytes(report.bytes)
            )),
        }
    }

    pub fn print_summary(&self, summary: &RegistrySummary) {
        match self.mode {
            OutputMode::Json => {
                let mut value = serde_json::to_value(summary).unwrap_or_default();
                if let Some(object) = value.as_object_mut() {
                    object.insert("type".to_string(), "summary".into());
                }
                self.print_json_object(&value);
            }
            OutputMode::Human => {
                self.print_header("Summary");
                println!("  Numbers:   {}", self.highlight(summary.total));
                println!("  Working:   {}", self.highlight(summary.working));
                println!("  Dead:      {}", self.highlight(summary.dead));
                println!("  Favorites: {}", self.highlight(summary.favorites));
            }
            OutputMode::Plain => {
                println!("Numbers: {}", summary.total);
                println!("Working: {}", summary.working);
                println!("Dead: {}", summary.dead);
                println!("Favorites: {}", summary.favorites);
            }
        }
    }

    pub fn print_help(&self) {
        if self.mode == OutputMode::Json {
            let commands: Vec<_> = HELP_TEXT
                .iter()
                .map(|(usage, about)| serde_json::json!({ "usage": usage, "about": about }))
                .collect();
            self.print_json_object(&serde_json::json!({
                "type": "help",
                "commands": commands
            }));
            return;
        }

        self.print_header("Commands");
        for (usage, about) in HELP_TEXT {
            if self.use_colors {
                println!("  {:<40} {}", style(usage).bold(), style(about).dim());
            } else {
                println!("  {:<40} {}", usage, about);
            }
        }
        println!();
        println!("  <ref> is a row number from the last result list or the number itself.");
    }

    // Specialized output methods
    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_rows(&self, rows: &[ResultRow]) {
        for row in rows {
            println!("{}", self.row_line(row));
        }
    }

    fn row_line(&self, row: &ResultRow) -> String {
        match self.mode {
            OutputMode::Plain => format!(
                "{}. {} {}{}",
                row.index,
                row.number.printable(),
                row.record.status,
                if row.record.favorite { " FAVORITE" } else { "" }
            ),
            _ => format!(
                "{:>4}. {:<22} {:<8} {}",
                row.index,
                row.number.printable(),
                self.styled_status(row.record.status),
                if row.record.favorite {
                    HEART_FILLED
                } else {
                    HEART_EMPTY
                }
            ),
        }
    }

    fn styled_status(&self, status: NumberStatus) -> String {
        if !self.use_colors {
            return status.to_string();
        }
        match status {
            NumberStatus::Working => style(status).green().bold().to_string(),
            NumberStatus::Dead => style(status).red().to_string(),
        }
    }

    fn highlight(&self, count: usize) -> String {
        if self.use_colors {
            style(count).cyan().bold().to_string()
        } else {
            count.to_string()
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
