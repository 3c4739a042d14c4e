use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bowling_core::game::generator::{GameGenerator, arrange};
use bowling_core::model::ledger::{LedgerError, ThrowLedger};
use bowling_core::score::{InvalidPinCombination, ScoreCalculator};
use bowling_core::{ScoreCard, ThrowLayout};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AuditConfig, ResolvedOutputs};

/// Scores every configured and generated game and writes the reports.
pub struct AuditRunner {
    config: AuditConfig,
    outputs: ResolvedOutputs,
    calculator: ScoreCalculator,
}

/// Summary details returned after a run.
#[derive(Debug, Clone)]
pub struct AuditSummary {
    pub games_audited: usize,
    pub scored: usize,
    pub rejected: usize,
    pub mismatches: usize,
    pub rows_written: usize,
    pub best_score: Option<u32>,
    pub mean_complete_score: Option<f64>,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize audit row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game '{game}' does not fit a ledger: {source}")]
    Ledger {
        game: String,
        #[source]
        source: LedgerError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum GameSource {
    Configured,
    Generated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Expectation {
    None,
    Met,
    Missed,
}

/// Expected outcome attached to a configured game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    Unspecified,
    Score(u32),
    Rejected,
}

struct AuditGame {
    id: String,
    source: GameSource,
    seed: Option<u64>,
    throws: Vec<u8>,
    expected: Expected,
}

#[derive(Debug, Serialize)]
struct AuditRow<'a> {
    run_id: &'a str,
    game_id: &'a str,
    source: GameSource,
    seed: Option<u64>,
    layout: ThrowLayout,
    throws: &'a [u8],
    status: &'static str,
    final_score: Option<u32>,
    frame_scores: Vec<Option<u32>>,
    notation: Vec<String>,
    complete: bool,
    reason: Option<&'static str>,
    error: Option<String>,
    expectation: Expectation,
}

impl AuditRunner {
    pub fn new(config: AuditConfig, outputs: ResolvedOutputs) -> Self {
        let calculator = ScoreCalculator::with_layout(config.layout);
        Self {
            config,
            outputs,
            calculator,
        }
    }

    /// Execute the audit, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<AuditSummary, AuditError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut tally = Tally::default();

        for game in self.games() {
            let ledger = ThrowLedger::from_throws(&game.throws).map_err(|source| {
                AuditError::Ledger {
                    game: game.id.clone(),
                    source,
                }
            })?;
            let outcome = self.calculator.compute_score_card(&ledger);
            let expectation = judge(game.expected, &outcome);
            log_game(&game, &outcome, expectation);
            tally.record(&game, &outcome, expectation);

            let row = self.row(&game, &outcome, expectation);
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;

        let summary = AuditSummary {
            games_audited: tally.games,
            scored: tally.scored,
            rejected: tally.rejections.len(),
            mismatches: tally.mismatches.len(),
            rows_written: tally.games,
            best_score: tally.best_score,
            mean_complete_score: tally.mean_complete_score(),
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        };
        write_markdown(&self.outputs.summary_md, &self.config, &summary, &tally)?;
        Ok(summary)
    }

    fn games(&self) -> Vec<AuditGame> {
        let mut games: Vec<AuditGame> = self
            .config
            .games
            .iter()
            .map(|game| AuditGame {
                id: game.name.clone(),
                source: GameSource::Configured,
                seed: None,
                throws: game.throws.clone(),
                expected: match (game.expect_score, game.expect_rejected) {
                    (_, true) => Expected::Rejected,
                    (Some(score), false) => Expected::Score(score),
                    (None, false) => Expected::Unspecified,
                },
            })
            .collect();

        if let Some(generated) = self.config.generated.as_ref() {
            let mut rng = StdRng::seed_from_u64(generated.seed.unwrap_or(0));
            for index in 0..generated.count {
                let seed = rng.next_u64();
                let mut generator =
                    GameGenerator::with_seed(seed).with_clear_rate(generated.clear_rate);
                let rolls = if generated.partial {
                    generator.partial_game()
                } else {
                    generator.complete_game()
                };
                games.push(AuditGame {
                    id: format!("G{index:05}"),
                    source: GameSource::Generated,
                    seed: Some(seed),
                    throws: arrange(&rolls, self.config.layout),
                    expected: Expected::Unspecified,
                });
            }
        }

        games
    }

    fn row<'a>(
        &'a self,
        game: &'a AuditGame,
        outcome: &Result<ScoreCard, InvalidPinCombination>,
        expectation: Expectation,
    ) -> AuditRow<'a> {
        let mut row = AuditRow {
            run_id: &self.config.run_id,
            game_id: &game.id,
            source: game.source,
            seed: game.seed,
            layout: self.config.layout,
            throws: &game.throws,
            status: "scored",
            final_score: None,
            frame_scores: Vec::new(),
            notation: Vec::new(),
            complete: false,
            reason: None,
            error: None,
            expectation,
        };

        match outcome {
            Ok(card) => {
                row.final_score = Some(card.final_score());
                row.frame_scores = card.frame_scores();
                row.notation = card
                    .frames()
                    .iter()
                    .map(|frame| frame.notation.clone())
                    .collect();
                row.complete = card.is_complete();
            }
            Err(err) => {
                row.status = "rejected";
                row.reason = Some(err.reason());
                row.error = Some(err.to_string());
            }
        }
        row
    }
}

fn judge(expected: Expected, outcome: &Result<ScoreCard, InvalidPinCombination>) -> Expectation {
    let met = match (expected, outcome) {
        (Expected::Unspecified, _) => return Expectation::None,
        (Expected::Score(score), Ok(card)) => card.final_score() == score,
        (Expected::Rejected, Err(_)) => true,
        _ => false,
    };
    if met {
        Expectation::Met
    } else {
        Expectation::Missed
    }
}

#[derive(Default)]
struct Tally {
    games: usize,
    scored: usize,
    complete_games: usize,
    complete_total: u64,
    best_score: Option<u32>,
    rejections: Vec<(String, &'static str, String)>,
    mismatches: Vec<String>,
}

impl Tally {
    fn record(
        &mut self,
        game: &AuditGame,
        outcome: &Result<ScoreCard, InvalidPinCombination>,
        expectation: Expectation,
    ) {
        self.games += 1;
        match outcome {
            Ok(card) => {
                self.scored += 1;
                if card.is_complete() {
                    self.complete_games += 1;
                    self.complete_total += u64::from(card.final_score());
                }
                self.best_score = self.best_score.max(Some(card.final_score()));
            }
            Err(err) => {
                self.rejections
                    .push((game.id.clone(), err.reason(), err.to_string()));
            }
        }
        if expectation == Expectation::Missed {
            self.mismatches.push(game.id.clone());
        }
    }

    fn mean_complete_score(&self) -> Option<f64> {
        if self.complete_games == 0 {
            None
        } else {
            Some(self.complete_total as f64 / self.complete_games as f64)
        }
    }
}

fn log_game(
    game: &AuditGame,
    outcome: &Result<ScoreCard, InvalidPinCombination>,
    expectation: Expectation,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    match outcome {
        Ok(card) => event!(
            target: "bowling_bench::audit",
            Level::INFO,
            game = %game.id,
            source = ?game.source,
            throws = game.throws.len(),
            final_score = card.final_score(),
            complete = card.is_complete(),
            expectation = ?expectation,
        ),
        Err(err) => event!(
            target: "bowling_bench::audit",
            Level::INFO,
            game = %game.id,
            source = ?game.source,
            throws = game.throws.len(),
            reason = err.reason(),
            index = err.index(),
            expectation = ?expectation,
        ),
    }

    if expectation == Expectation::Missed {
        tracing::warn!(
            target: "bowling_bench::audit",
            game = %game.id,
            message = "game outcome does not match its expectation"
        );
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), AuditError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_markdown(
    path: &Path,
    config: &AuditConfig,
    summary: &AuditSummary,
    tally: &Tally,
) -> Result<(), AuditError> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "# Score audit: {}", config.run_id)?;
    writeln!(out)?;
    writeln!(out, "| Metric | Value |")?;
    writeln!(out, "|---|---|")?;
    writeln!(out, "| Layout | {} |", config.layout)?;
    writeln!(out, "| Games audited | {} |", summary.games_audited)?;
    writeln!(out, "| Scored | {} |", summary.scored)?;
    writeln!(out, "| Rejected | {} |", summary.rejected)?;
    writeln!(out, "| Expectation mismatches | {} |", summary.mismatches)?;
    match summary.mean_complete_score {
        Some(mean) => writeln!(out, "| Mean score (complete games) | {mean:.2} |")?,
        None => writeln!(out, "| Mean score (complete games) | n/a |")?,
    }
    match summary.best_score {
        Some(best) => writeln!(out, "| Best score | {best} |")?,
        None => writeln!(out, "| Best score | n/a |")?,
    }

    if !tally.rejections.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Rejected games")?;
        writeln!(out)?;
        writeln!(out, "| Game | Reason | Detail |")?;
        writeln!(out, "|---|---|---|")?;
        for (game, reason, detail) in &tally.rejections {
            writeln!(out, "| {game} | {reason} | {detail} |")?;
        }
    }

    if !tally.mismatches.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Expectation mismatches")?;
        writeln!(out)?;
        for game in &tally.mismatches {
            writeln!(out, "- {game}")?;
        }
    }

    out.flush()?;
    Ok(())
}
