//! Terminal frontend for the CUI player
//!
//! Draws resolved nodes on an ANSI terminal with a typewriter effect,
//! a prompt prefix before each option and a trailing cursor.

use crate::application::frontend::Frontend;
use crate::domain::entities::ContentConfig;
use crate::domain::resolution::ResolvedNode;
use async_trait::async_trait;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;

const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[H";
const CLEAR_DELAY: Duration = Duration::from_millis(120);
const MIN_OPTION_TYPING_DELAY: Duration = Duration::from_millis(8);
const BELL: &str = "\x07";

/// Presentation settings taken from the document config
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalStyle {
    pub typing_speed: Duration,
    pub typing_sound_interval: u32,
    pub cursor_char: String,
    pub prompt_prefix: String,
    /// Print everything at once, skipping every delay
    pub instant: bool,
}

impl TerminalStyle {
    pub fn from_config(config: &ContentConfig, instant: bool) -> Self {
        Self {
            typing_speed: config.typing_speed(),
            typing_sound_interval: config.typing_sound_interval(),
            cursor_char: config.cursor_char().to_string(),
            prompt_prefix: config.prompt_prefix().to_string(),
            instant,
        }
    }

    /// Options type faster than body text, with a floor
    fn option_typing_speed(&self) -> Duration {
        self.typing_speed.mul_f64(0.6).max(MIN_OPTION_TYPING_DELAY)
    }
}

/// Frontend writing to any `Write` sink, usually stdout
pub struct TerminalFrontend<W: Write + Send> {
    out: W,
    style: TerminalStyle,
    last_rendered: Option<ResolvedNode>,
    rendered_at: Option<Instant>,
    render_count: u64,
    typed_chars: u64,
}

impl<W: Write + Send> TerminalFrontend<W> {
    pub fn new(out: W, style: TerminalStyle) -> Self {
        Self {
            out,
            style,
            last_rendered: None,
            rendered_at: None,
            render_count: 0,
            typed_chars: 0,
        }
    }

    pub fn last_rendered(&self) -> Option<&ResolvedNode> {
        self.last_rendered.as_ref()
    }

    /// When the last render finished drawing
    pub fn rendered_at(&self) -> Option<Instant> {
        self.rendered_at
    }

    /// Number of nodes rendered so far
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Write a line that is not part of a node, e.g. a player message
    pub fn notice(&mut self, message: &str) {
        self.write_str(&format!("{message}\n"));
    }

    async fn type_text(&mut self, text: &str, delay: Duration) {
        if self.style.instant || delay.is_zero() {
            self.write_str(text);
            return;
        }

        let interval = u64::from(self.style.typing_sound_interval.max(1));
        for ch in text.chars() {
            let mut buf = [0u8; 4];
            self.write_str(ch.encode_utf8(&mut buf));
            if !ch.is_whitespace() {
                self.typed_chars += 1;
                if self.typed_chars % interval == 0 {
                    log::trace!("sound cue: typing");
                }
            }
            tokio::time::sleep(delay).await;
        }
    }

    fn write_str(&mut self, text: &str) {
        // A closed terminal leaves nothing to report to
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            log::warn!("terminal write failed: {e}");
        }
    }
}

#[async_trait]
impl<W: Write + Send> Frontend for TerminalFrontend<W> {
    async fn clear(&mut self) {
        self.write_str(CLEAR_SEQUENCE);
        if !self.style.instant {
            tokio::time::sleep(CLEAR_DELAY).await;
        }
    }

    async fn render(&mut self, node: ResolvedNode) {
        if let Some(sound) = &node.sound {
            log::debug!("sound cue: {sound}");
            self.write_str(BELL);
        }

        let body = format!("{}\n", node.text());
        let speed = self.style.typing_speed;
        self.type_text(&body, speed).await;

        if !node.choices.is_empty() {
            self.write_str("\n");
            let option_speed = self.style.option_typing_speed();
            for (index, choice) in node.choices.iter().enumerate() {
                let line = format!("{}{}. {}\n", self.style.prompt_prefix, index + 1, choice.label);
                self.type_text(&line, option_speed).await;
            }
        }

        let cursor = self.style.cursor_char.clone();
        self.write_str(&format!("\n{cursor}\n"));

        self.last_rendered = Some(node);
        self.rendered_at = Some(Instant::now());
        self.render_count += 1;
    }
}
