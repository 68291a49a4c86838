use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use locsheet_cli::{
    run_edit_remove_command, run_edit_rename_command, run_edit_set_command, run_export_command,
    run_import_command, run_lang_command, run_stats_command, run_view_command, LangAction,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a CSV sheet into a table file.
    Import {
        /// The table JSON file (created on first import)
        #[arg(short, long)]
        table: String,

        /// Sheet URL (stored in the table for later imports)
        #[arg(short, long)]
        url: Option<String>,

        /// Local sheet file instead of a URL
        #[arg(short, long)]
        file: Option<String>,

        /// Field delimiter; sniffed from the header when omitted
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Default language for a newly created table
        #[arg(long, default_value = "en")]
        default_language: String,
    },

    /// List the entries of a table file.
    View {
        /// The table JSON file to view
        #[arg(short, long)]
        table: String,

        /// Only show this language column
        #[arg(short, long)]
        lang: Option<String>,

        /// Case-insensitive substring filter over keys and texts
        #[arg(long)]
        filter: Option<String>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Show coverage statistics for a table file.
    Stats {
        /// The table JSON file to audit
        #[arg(short, long)]
        table: String,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a table file back to CSV.
    Export {
        /// The table JSON file to export
        #[arg(short, long)]
        table: String,

        /// Output CSV path; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Edit entries in a table file.
    Edit {
        #[command(subcommand)]
        command: EditCommands,
    },

    /// Get or change the active language.
    Lang {
        /// The settings JSON file holding the current language
        #[arg(short, long, default_value = "locsheet-settings.json")]
        settings: String,

        /// Supported languages, in rotation order
        #[arg(long, default_value = "en,ru", value_delimiter = ',')]
        languages: Vec<String>,

        #[command(subcommand)]
        command: LangCommands,
    },
}

#[derive(Subcommand, Debug)]
enum EditCommands {
    /// Set one language's text for a key (creates the entry when absent).
    Set {
        #[arg(short, long)]
        table: String,
        key: String,
        #[arg(short, long)]
        lang: String,
        value: String,
    },

    /// Rename a key.
    Rename {
        #[arg(short, long)]
        table: String,
        old_key: String,
        new_key: String,
    },

    /// Remove an entry.
    Remove {
        #[arg(short, long)]
        table: String,
        key: String,
    },
}

#[derive(Subcommand, Debug)]
enum LangCommands {
    /// Print the active language.
    Get,
    /// Set the active language.
    Set { language: String },
    /// Rotate to the next supported language.
    Next,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = match Args::parse().commands {
        Commands::Import {
            table,
            url,
            file,
            delimiter,
            default_language,
        } => run_import_command(table, url, file, delimiter, default_language),
        Commands::View {
            table,
            lang,
            filter,
            full,
        } => run_view_command(table, lang, filter, full),
        Commands::Stats { table, json } => run_stats_command(table, json),
        Commands::Export { table, output } => run_export_command(table, output),
        Commands::Edit { command } => match command {
            EditCommands::Set {
                table,
                key,
                lang,
                value,
            } => run_edit_set_command(table, key, lang, value),
            EditCommands::Rename {
                table,
                old_key,
                new_key,
            } => run_edit_rename_command(table, old_key, new_key),
            EditCommands::Remove { table, key } => run_edit_remove_command(table, key),
        },
        Commands::Lang {
            settings,
            languages,
            command,
        } => {
            let action = match command {
                LangCommands::Get => LangAction::Get,
                LangCommands::Set { language } => LangAction::Set(language),
                LangCommands::Next => LangAction::Next,
            };
            run_lang_command(settings, languages, action)
        }
    };

    if let Err(message) = result {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}
