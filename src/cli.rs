use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Print debug logs to stderr
    #[clap(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search open tabs, history and bookmarks.
    ///
    /// Every word must appear in the title or url, in any order.
    Search {
        /// Search words. Leave empty to list everything.
        query: Vec<String>,

        /// Profile to search history and bookmarks of.
        /// Defaults to the selected profile.
        #[clap(short, long)]
        profile: Option<String>,

        /// Print results as json
        #[clap(long, default_value = "false")]
        json: bool,
    },

    /// Show or change the selected profile
    Profile {
        /// Profile id to select
        id: Option<String>,
    },

    /// List browser profiles
    Profiles {},
}
