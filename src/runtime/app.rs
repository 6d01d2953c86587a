use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use anyhow::{Context, Result};

use tablist::commands::Cmd;
use tablist::config::PopupConfig;
use tablist::messages::Msg;
use tablist::model::PopupModel;
use tablist::render::{RenderSink, TextSink};
use tablist::source::{perform, TabSource};
use tablist::update::update;

use super::input::{parse_line, Input, HELP};

pub struct App {
    model: PopupModel,
    sink: TextSink,
    source: Arc<dyn TabSource>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Source requests whose result message has not arrived yet
    pending: usize,
    /// Sink changed since the list was last printed
    dirty: bool,
}

impl App {
    pub fn new(config: PopupConfig, source: Arc<dyn TabSource>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model: PopupModel::new(config),
            sink: TextSink::new(),
            source,
            msg_tx,
            msg_rx,
            pending: 0,
            dirty: false,
        }
    }

    #[cfg(test)]
    pub fn model(&self) -> &PopupModel {
        &self.model
    }

    /// Load the first snapshot, then execute commands from `input` until EOF or `quit`
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.dispatch(Msg::Reload);
        self.settle();
        self.print(out)?;

        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match parse_line(&line, self.model.filter.query(), self.sink.row_map()) {
                Ok(Input::Msgs(msgs)) => {
                    for msg in msgs {
                        self.dispatch(msg);
                        self.settle();
                    }
                    if self.dirty {
                        self.print(out)?;
                    }
                }
                Ok(Input::Help) => writeln!(out, "{}", HELP)?,
                Ok(Input::Quit) => break,
                Err(e) => writeln!(out, "error: {}", e)?,
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Wait for every outstanding source request and apply its result
    fn settle(&mut self) {
        while self.pending > 0 {
            match self.msg_rx.recv() {
                Ok(msg) => {
                    self.pending -= 1;
                    self.dispatch(msg);
                }
                Err(e) => {
                    tracing::error!("Result channel closed with {} pending: {}", self.pending, e);
                    self.pending = 0;
                }
            }
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Render => {
                self.sink.render(self.model.projection());
                self.dirty = true;
            }
            Cmd::RemoveRow { tab_id, emptied } => {
                self.sink.on_row_removed(tab_id, emptied);
                self.dirty = true;
            }
            Cmd::UpdateMute { tab_id, muted } => {
                self.sink.on_mute_state_changed(tab_id, muted);
                self.dirty = true;
            }
            Cmd::Highlight { index, visible } => {
                self.sink.on_highlight_changed(index, visible);
                self.dirty = true;
            }
            Cmd::Source(request) => {
                tracing::debug!(?request, "Sending tab source request");
                let tx = self.msg_tx.clone();
                let source = Arc::clone(&self.source);
                self.pending += 1;
                std::thread::spawn(move || {
                    let msg = perform(source.as_ref(), request);
                    let _ = tx.send(msg);
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn print(&mut self, out: &mut impl Write) -> Result<()> {
        let filter = self.model.filter.query();
        if !filter.is_empty() {
            writeln!(out, "filter: {:?}", filter)?;
        }
        write!(out, "{}", self.sink.output())?;
        writeln!(out)?;
        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}
