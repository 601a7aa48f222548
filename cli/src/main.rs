use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use tandem_core::{Difficulty, GameSession, QuestionBank, SeededRandom};
use tandem_history::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

mod audio;
mod controller;
mod logging;
mod render;

use controller::{Controller, Ending};

#[derive(Parser, Debug)]
#[command(version, about = "Cooperative two-player minesweeper", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Where finished games are stored
    #[arg(long, global = true, default_value = "history.json")]
    history: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in this terminal, taking turns at the keyboard
    Play(PlayArgs),
    /// List finished games
    History(HistoryArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    #[arg(long, default_value = "Player 1")]
    player1: String,

    #[arg(long, default_value = "Player 2")]
    player2: String,

    /// User the finished game is saved under
    #[arg(short, long, default_value = "guest")]
    user: String,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON array of questions to use instead of the built-in ones
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Do not ring the terminal bell
    #[arg(long)]
    mute: bool,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// EASY, MEDIUM, HARD or ALL
    #[arg(long, default_value = ALL)]
    difficulty: Selection<Difficulty>,

    /// User name or ALL
    #[arg(long, default_value = ALL)]
    user: Selection<String>,

    /// WIN, LOSE or ALL
    #[arg(long, default_value = ALL)]
    outcome: Selection<Outcome>,

    /// Score order, asc or desc
    #[arg(long, default_value = "desc")]
    order: SortOrder,

    /// Sort by date instead of score
    #[arg(long)]
    by_date: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(log_level) = cli.verbose.log_level() {
        logging::init(log_level)?;
    }
    let store = HistoryStore::new(&cli.history);

    match cli.command {
        Command::Play(args) => play(args, &store),
        Command::History(args) => {
            list_history(&args, &store);
            Ok(())
        }
    }
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn load_questions(path: Option<&Path>) -> anyhow::Result<QuestionBank> {
    let Some(path) = path else {
        return Ok(QuestionBank::builtin());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read questions from {}", path.display()))?;
    let bank = QuestionBank::from_json(&text)
        .with_context(|| format!("Invalid questions in {}", path.display()))?;
    if bank.is_empty() {
        anyhow::bail!("No usable questions in {}", path.display());
    }
    log::debug!("Loaded {} questions", bank.len());
    Ok(bank)
}

fn play(args: PlayArgs, store: &HistoryStore) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(random_seed);
    log::debug!("seed: {seed}");
    let questions = load_questions(args.questions.as_deref())?;

    let mut rng = SeededRandom::new(seed);
    let session = GameSession::new(args.difficulty, &mut rng)?;
    let audio = if args.mute {
        audio::AudioService::muted()
    } else {
        audio::AudioService::terminal()
    };
    let names = [args.player1, args.player2];

    let started = Instant::now();
    let mut controller = Controller::new(
        session,
        rng,
        questions,
        audio,
        names.clone(),
        io::stdin().lock(),
        io::stdout().lock(),
    );
    let ending = controller.run().context("Terminal I/O failed")?;

    match ending {
        Ending::Finished(summary) => {
            let [player1, player2] = names;
            let record =
                GameRecord::finished_now(&summary, player1, player2, started.elapsed().as_secs());
            if store.append(&args.user, record) {
                println!("Saved to {}", store.path().display());
            }
        }
        Ending::Abandoned => log::info!("Game not finished, nothing saved"),
    }
    Ok(())
}

fn list_history(args: &HistoryArgs, store: &HistoryStore) {
    let filter = HistoryFilter::combined([
        Some(HistoryFilter::Difficulty(args.difficulty.clone())),
        Some(HistoryFilter::User(args.user.clone())),
        Some(HistoryFilter::Outcome(args.outcome.clone())),
    ]);
    let sort = if args.by_date {
        HistorySort::Date(args.order)
    } else {
        HistorySort::Score(args.order)
    };

    let entries = store.load();
    let mut shown: Vec<_> = filter.apply(&entries).cloned().collect();
    sort.sort(&mut shown);

    if shown.is_empty() {
        println!("No games match");
        return;
    }
    for line in history_lines(&shown) {
        println!("{line}");
    }
}

fn history_lines(entries: &[HistoryEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|HistoryEntry { username, record }| {
            format!(
                "{}  {:<12} {:<6} {:<4} {:>6} {:>8}  {} & {}",
                record.date_time.format("%Y-%m-%d %H:%M"),
                username,
                record.difficulty,
                Outcome::of(record.coop_win),
                record.final_score,
                record.duration,
                record.player1,
                record.player2
            )
        })
        .collect()
}
