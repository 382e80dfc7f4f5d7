//! Line-oriented input scripts.
//!
//! ```text
//! # comments and blank lines are ignored
//! start                  # tap a button: start | view | fade
//! press gesture          # hold / let go: press <button>, release <button>
//! hand 0 1.5 0.1         # hand position for following ticks
//! target 2               # target <id> [name] [ready]
//! untarget
//! tick 30                # advance n ticks (default 1)
//! settle                 # tick until no transition is running
//! expect state running   # not-started | running | all-collected | completed
//! expect view virtual    # augmented | virtual
//! expect next 2
//! ```

use std::collections::VecDeque;

use anyhow::{anyhow, bail, Context};
use dualhunt_core::view::TransitionPhase;
use dualhunt_core::{Hunt, LifecycleState};
use dualhunt_hal::{
    Button, FrameSample, InputEvent, InputSource, ObjectId, Presentation, TargetHit, ViewMode,
};
use glam::Vec3;

use crate::driver::{Driver, Step};

const HEAD: Vec3 = Vec3::new(0.0, 1.6, 0.0);
const HAND_REST: Vec3 = Vec3::new(0.25, 1.0, 0.4);

#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    State(LifecycleState),
    View(ViewMode),
    Next(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Press(Button),
    Release(Button),
    Hand(Vec3),
    Target {
        id: ObjectId,
        name: String,
        ready: bool,
    },
    Untarget,
    Tick(u32),
    Settle,
    Expect(Expectation),
}

/// Parsed command with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub command: Command,
}

fn parse_button(word: &str) -> anyhow::Result<Button> {
    match word {
        "start" => Ok(Button::Start),
        "view" => Ok(Button::View),
        "fade" => Ok(Button::Fade),
        "gesture" => Ok(Button::Gesture),
        other => bail!("unknown button `{other}`"),
    }
}

fn parse_view(word: &str) -> anyhow::Result<ViewMode> {
    match word {
        "augmented" | "a" => Ok(ViewMode::A),
        "virtual" | "b" => Ok(ViewMode::B),
        other => bail!("unknown view `{other}`"),
    }
}

fn parse_state(word: &str) -> anyhow::Result<LifecycleState> {
    match word {
        "not-started" => Ok(LifecycleState::NotStarted),
        "running" => Ok(LifecycleState::Running),
        "all-collected" => Ok(LifecycleState::AllCollected),
        "completed" => Ok(LifecycleState::Completed),
        other => bail!("unknown lifecycle state `{other}`"),
    }
}

fn parse_command(words: &[&str]) -> anyhow::Result<Vec<Command>> {
    let arg = |i: usize| -> anyhow::Result<&str> {
        words
            .get(i)
            .copied()
            .ok_or_else(|| anyhow!("`{}` needs more arguments", words[0]))
    };

    let commands = match words[0] {
        "start" | "view" | "fade" => {
            let button = parse_button(words[0])?;
            vec![Command::Press(button), Command::Release(button)]
        }
        "press" => vec![Command::Press(parse_button(arg(1)?)?)],
        "release" => vec![Command::Release(parse_button(arg(1)?)?)],
        "hand" => {
            let mut xyz = [0.0f32; 3];
            for (i, v) in xyz.iter_mut().enumerate() {
                let word = arg(i + 1)?;
                *v = word
                    .parse()
                    .with_context(|| format!("bad coordinate `{word}`"))?;
            }
            vec![Command::Hand(Vec3::from_array(xyz))]
        }
        "target" => {
            let id: u32 = arg(1)?
                .parse()
                .with_context(|| format!("bad object id `{}`", words[1]))?;
            let mut name = String::new();
            let mut ready = false;
            for word in &words[2..] {
                if *word == "ready" {
                    ready = true;
                } else {
                    name = (*word).to_string();
                }
            }
            vec![Command::Target {
                id: ObjectId(id),
                name,
                ready,
            }]
        }
        "untarget" => vec![Command::Untarget],
        "tick" => {
            let n = match words.get(1) {
                Some(word) => word
                    .parse()
                    .with_context(|| format!("bad tick count `{word}`"))?,
                None => 1,
            };
            vec![Command::Tick(n)]
        }
        "settle" => vec![Command::Settle],
        "expect" => {
            let expectation = match arg(1)? {
                "state" => Expectation::State(parse_state(arg(2)?)?),
                "view" => Expectation::View(parse_view(arg(2)?)?),
                "next" => {
                    let word = arg(2)?;
                    Expectation::Next(
                        word.parse()
                            .with_context(|| format!("bad index `{word}`"))?,
                    )
                }
                other => bail!("unknown expectation `{other}`"),
            };
            vec![Command::Expect(expectation)]
        }
        other => bail!("unknown command `{other}`"),
    };
    Ok(commands)
}

/// Parse a whole script. Errors carry the 1-based line number.
pub fn parse(text: &str) -> anyhow::Result<Vec<Line>> {
    let mut lines = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let number = i + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let words: Vec<&str> = content.split_whitespace().collect();
        let commands = parse_command(&words).with_context(|| format!("line {number}"))?;
        lines.extend(commands.into_iter().map(|command| Line { number, command }));
    }
    Ok(lines)
}

/// Plays a parsed script against the hunt.
pub struct ScriptInput {
    lines: Vec<Line>,
    cursor: usize,
    pending_ticks: u32,
    settling: bool,
    events: VecDeque<InputEvent>,
    hand: Vec3,
    target: Option<(ObjectId, String, bool)>,
}

impl ScriptInput {
    pub fn new(lines: Vec<Line>) -> Self {
        Self {
            lines,
            cursor: 0,
            pending_ticks: 0,
            settling: false,
            events: VecDeque::new(),
            hand: HAND_REST,
            target: None,
        }
    }

    pub fn from_text(text: &str) -> anyhow::Result<Self> {
        Ok(Self::new(parse(text)?))
    }

    fn check<P: Presentation>(
        expectation: &Expectation,
        hunt: &Hunt<P>,
        line: usize,
    ) -> anyhow::Result<()> {
        match *expectation {
            Expectation::State(state) if hunt.lifecycle() != state => {
                bail!("line {line}: expected {state:?}, hunt is {:?}", hunt.lifecycle())
            }
            Expectation::View(view) if hunt.active_view() != view => bail!(
                "line {line}: expected {} view, active is {}",
                view.as_str(),
                hunt.active_view().as_str()
            ),
            Expectation::Next(index) if hunt.next_index() != index => bail!(
                "line {line}: expected next item {index}, cursor is {}",
                hunt.next_index()
            ),
            _ => Ok(()),
        }
    }
}

impl InputSource for ScriptInput {
    fn init(&mut self) {
        log::info!("script: {} command(s)", self.lines.len());
    }

    fn poll(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

impl Driver for ScriptInput {
    fn prepare<P: Presentation>(&mut self, hunt: &Hunt<P>) -> anyhow::Result<Step> {
        if self.pending_ticks > 0 {
            self.pending_ticks -= 1;
            return Ok(Step::Tick);
        }
        if self.settling {
            if hunt.transition_phase() != TransitionPhase::Idle {
                return Ok(Step::Tick);
            }
            self.settling = false;
        }

        while let Some(line) = self.lines.get(self.cursor) {
            let number = line.number;
            match &line.command {
                // Queued events must land before the hunt is inspected.
                Command::Expect(_) | Command::Settle if !self.events.is_empty() => {
                    return Ok(Step::Flush)
                }
                Command::Expect(expectation) => Self::check(expectation, hunt, number)?,
                Command::Press(button) => self.events.push_back(InputEvent::Pressed(*button)),
                Command::Release(button) => self.events.push_back(InputEvent::Released(*button)),
                Command::Hand(position) => self.hand = *position,
                Command::Target { id, name, ready } => {
                    self.target = Some((*id, name.clone(), *ready));
                }
                Command::Untarget => self.target = None,
                Command::Tick(0) => {}
                Command::Tick(n) => {
                    self.pending_ticks = n - 1;
                    self.cursor += 1;
                    return Ok(Step::Tick);
                }
                Command::Settle => {
                    if hunt.transition_phase() != TransitionPhase::Idle {
                        self.settling = true;
                        self.cursor += 1;
                        return Ok(Step::Tick);
                    }
                }
            }
            self.cursor += 1;
        }
        Ok(Step::Done)
    }

    fn sample(&self, delta_seconds: f32) -> FrameSample<'_> {
        FrameSample {
            delta_seconds,
            hand: self.hand,
            head: HEAD,
            target: self.target.as_ref().map(|(id, name, ready)| TargetHit {
                id: *id,
                name: name.as_str(),
                ready: *ready,
            }),
        }
    }
}
