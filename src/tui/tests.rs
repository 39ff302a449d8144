// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Advomail-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Advomail and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, style::Color, Terminal};

use super::{
    draw, footer_label_ucfirst, is_error_screen_quit, panel_border_style_for_focus, view_title,
    App, ExternalAction, Exporters, Focus,
};
use crate::choice::ChoiceList;
use crate::export::{Clipboard, ExportError, MailLauncher};
use crate::model::{Directory, Party, PartyId, RegionCode, Representative};
use crate::state::{Category, ComposerState, FlowState, LeaderStage};
use crate::template::Tone;

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingClipboard {
    name: &'static str,
    fail: bool,
    log: Log,
}

impl Clipboard for RecordingClipboard {
    fn name(&self) -> &'static str {
        self.name
    }

    fn write_text(&mut self, text: &str) -> Result<(), ExportError> {
        if self.fail {
            return Err(ExportError::Io(io::Error::new(io::ErrorKind::NotFound, "no clipboard")));
        }
        self.log.borrow_mut().push(format!("{}:{text}", self.name));
        Ok(())
    }
}

struct RecordingLauncher {
    log: Log,
}

impl MailLauncher for RecordingLauncher {
    fn open(&mut self, uri: &str) -> Result<(), ExportError> {
        self.log.borrow_mut().push(uri.to_owned());
        Ok(())
    }
}

fn directory() -> Directory {
    let mut reps = BTreeMap::new();
    reps.insert(
        RegionCode::new("new-south-wales").expect("region"),
        vec![Representative::new("Jane Smith"), Representative::new("Adam Brown")],
    );
    reps.insert(RegionCode::new("vic").expect("region"), vec![Representative::new("Zoe Adams")]);
    Directory::new(
        vec![
            Party::new(PartyId::new("partyA").expect("party"), "Party A"),
            Party::new(PartyId::new("partyB").expect("party"), "Party B"),
        ],
        reps,
    )
}

struct Harness {
    app: App,
    log: Log,
}

fn harness_with(primary_fails: bool) -> Harness {
    let log = Log::default();
    let exporters = Exporters {
        clipboard: Box::new(RecordingClipboard {
            name: "primary",
            fail: primary_fails,
            log: log.clone(),
        }),
        fallback_clipboard: Box::new(RecordingClipboard {
            name: "fallback",
            fail: false,
            log: log.clone(),
        }),
        launcher: Box::new(RecordingLauncher { log: log.clone() }),
    };
    Harness {
        app: App::new(ComposerState::new(directory()), exporters),
        log,
    }
}

fn harness() -> Harness {
    harness_with(false)
}

impl Harness {
    fn press(&mut self, code: KeyCode) -> bool {
        self.app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(&mut self, ch: char) -> bool {
        self.app.handle_key_event(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    fn toast(&self) -> Option<&str> {
        self.app.toast.as_ref().map(|toast| toast.message.as_str())
    }

    fn select_representative_flow(&mut self) {
        self.press(KeyCode::Left);
        assert_eq!(self.app.state.selection().category(), Some(Category::Representative));
        self.press(KeyCode::Tab);
        assert_eq!(self.app.focus, Focus::Region);
        self.type_text("new");
        self.press(KeyCode::Enter);
        assert_eq!(self.app.focus, Focus::Representative);
        self.press(KeyCode::Enter);
    }

    fn screen(&mut self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|frame| draw(frame, &mut self.app)).expect("draw");
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn starts_with_only_the_category_field() {
    let h = harness();
    assert_eq!(h.app.focus, Focus::Category);
    assert_eq!(h.app.focus_order(), [Focus::Category]);
    assert_eq!(h.app.parties.options().len(), 2);
    assert_eq!(h.app.regions.options().len(), 2);
    assert!(h.app.representatives.is_empty());
}

#[test]
fn right_arrow_picks_leader_and_party_list_searches() {
    let mut h = harness();
    h.press(KeyCode::Right);
    assert_eq!(h.app.state.selection().category(), Some(Category::Leader));
    assert_eq!(
        h.app.focus_order(),
        [Focus::Category, Focus::Party, Focus::Tone, Focus::Subject]
    );

    h.press(KeyCode::Tab);
    assert_eq!(h.app.focus, Focus::Party);
    h.type_text("b");
    let visible = h.app.parties.visible_options().map(|o| o.text.as_str()).collect::<Vec<_>>();
    assert_eq!(visible, ["Party B"]);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.selection().party().map(PartyId::as_str), Some("partyB"));
    assert_eq!(h.app.state.flow_state(), FlowState::Leader(LeaderStage::PartySelected));
    assert_eq!(h.app.parties.selection().map(|o| o.value.as_str()), Some("partyB"));
    assert_eq!(h.app.parties.query(), "");
    assert_eq!(h.app.focus, Focus::Tone);
}

#[test]
fn representative_flow_generates_and_focuses_output() {
    let mut h = harness();
    h.select_representative_flow();

    let names = h.app.representatives.options().iter().map(|o| o.text.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Adam Brown", "Jane Smith"]);
    assert_eq!(h.app.state.selection().representative(), Some("Adam Brown"));

    h.ctrl('g');
    let email = h.app.state.output().expect("output");
    assert_eq!(email.subject, "Constituent request from New South Wales for Adam Brown");
    assert_eq!(h.app.focus, Focus::Output);
    assert_eq!(h.toast(), Some("Email generated"));
}

#[test]
fn generate_before_complete_shows_reason() {
    let mut h = harness();
    h.ctrl('g');
    assert!(h.app.state.output().is_none());
    assert_eq!(h.toast(), Some("select a recipient type first"));
}

#[test]
fn switching_category_clears_dependent_widgets_and_output() {
    let mut h = harness();
    h.select_representative_flow();
    h.ctrl('g');
    assert!(h.app.state.output().is_some());

    h.app.focus = Focus::Category;
    h.press(KeyCode::Right);
    assert_eq!(h.app.state.selection().category(), Some(Category::Leader));
    assert!(h.app.state.output().is_none());
    assert!(h.app.regions.selection().is_none());
    assert!(h.app.representatives.is_empty());
    assert!(!h.app.focus_order().contains(&Focus::Output));
}

#[test]
fn reselecting_region_resets_representative() {
    let mut h = harness();
    h.select_representative_flow();

    assert_eq!(h.app.focus, Focus::Tone);
    h.press(KeyCode::BackTab);
    h.press(KeyCode::BackTab);
    assert_eq!(h.app.focus, Focus::Region);
    h.type_text("vic");
    h.press(KeyCode::Enter);

    assert!(h.app.state.selection().representative().is_none());
    let names = h.app.representatives.options().iter().map(|o| o.text.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Zoe Adams"]);
    assert!(h.app.representatives.selection().is_none());
}

#[test]
fn representative_list_matches_initials_fuzzily() {
    let mut h = harness();
    h.press(KeyCode::Left);
    h.press(KeyCode::Tab);
    h.type_text("new");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.focus, Focus::Representative);

    h.type_text("jsm");
    let visible =
        h.app.representatives.visible_options().map(|o| o.text.as_str()).collect::<Vec<_>>();
    assert_eq!(visible, ["Jane Smith"]);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.state.selection().representative(), Some("Jane Smith"));
}

#[test]
fn tone_and_subject_feed_the_rendered_email() {
    let mut h = harness();
    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.focus, Focus::Tone);

    h.press(KeyCode::Right);
    assert_eq!(h.app.state.selection().tone(), Tone::Neutral);
    h.press(KeyCode::Enter);
    assert_eq!(h.app.focus, Focus::Subject);
    h.type_text("  Meeting request?  ");
    h.press(KeyCode::Backspace);

    h.ctrl('g');
    let email = h.app.state.output().expect("output");
    assert_eq!(email.subject, "Meeting request?");
    assert!(email.body.contains(Tone::Neutral.opening_line()));
}

#[test]
fn question_mark_is_text_inside_lists_and_help_elsewhere() {
    let mut h = harness();
    h.press(KeyCode::Char('?'));
    assert!(h.app.show_help);
    h.press(KeyCode::Esc);
    assert!(!h.app.show_help);

    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Char('?'));
    assert!(!h.app.show_help);
    assert_eq!(h.app.parties.query(), "?");

    h.press(KeyCode::F(1));
    assert!(h.app.show_help);
}

#[test]
fn esc_clears_query_before_quitting() {
    let mut h = harness();
    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.type_text("par");

    assert!(!h.press(KeyCode::Esc));
    assert_eq!(h.app.parties.query(), "");
    assert!(h.press(KeyCode::Esc));
}

#[test]
fn ctrl_c_and_ctrl_q_quit() {
    let mut h = harness();
    assert!(h.ctrl('c'));
    assert!(h.ctrl('q'));
    h.app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
    assert!(h.app.should_quit);
}

#[test]
fn copy_uses_primary_clipboard() {
    let mut h = harness();
    h.ctrl('y');
    assert_eq!(h.toast(), Some("Nothing to copy yet"));

    h.select_representative_flow();
    h.ctrl('g');
    h.ctrl('y');

    assert_eq!(h.toast(), Some("Email copied to clipboard!"));
    let log = h.log.borrow();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("primary:Subject: Constituent request from New South Wales"));
}

#[test]
fn copy_falls_back_when_primary_fails() {
    let mut h = harness_with(true);
    h.select_representative_flow();
    h.ctrl('g');
    h.ctrl('y');

    assert_eq!(h.toast(), Some("Copied (fallback)."));
    let log = h.log.borrow();
    assert_eq!(log.len(), 1);
    assert!(log[0].starts_with("fallback:Subject: "));
}

#[test]
fn ctrl_o_queues_mailto_handoff() {
    let mut h = harness();
    h.ctrl('o');
    assert!(h.app.take_external_action().is_none());
    assert_eq!(h.toast(), Some("Generate an email first"));

    h.press(KeyCode::Right);
    h.press(KeyCode::Tab);
    h.press(KeyCode::Enter);
    h.ctrl('g');
    h.ctrl('o');

    let action = h.app.take_external_action().expect("action");
    let ExternalAction::OpenMailClient { uri } = &action;
    assert!(uri.starts_with(
        "mailto:?subject=Request%20for%20meeting%20with%20Party%20A%20Party%20Leader&body=Dear%20"
    ));

    h.app.execute_external_action(action.clone()).expect("launch");
    assert_eq!(h.log.borrow().as_slice(), [uri.clone()]);
}

#[test]
fn screen_reflects_visibility() {
    let mut h = harness();
    let screen = h.screen();
    assert!(screen.contains("Recipient type"));
    assert!(screen.contains("Select recipient type"));
    assert!(!screen.contains("Tone"));

    h.select_representative_flow();
    h.ctrl('g');
    let screen = h.screen();
    assert!(screen.contains("Representative"));
    assert!(screen.contains("Generate email"));
    assert!(screen.contains("Subject: Constituent request"));
    assert!(screen.contains("Dear Adam Brown,"));
}

#[test]
fn help_overlay_renders() {
    let mut h = harness();
    h.press(KeyCode::F(1));
    let screen = h.screen();
    assert!(screen.contains("Help"));
    assert!(screen.contains("Generate email"));
}

#[test]
fn error_screen_quits_on_q_esc_and_ctrl_c() {
    assert!(is_error_screen_quit(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    assert!(is_error_screen_quit(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
    assert!(is_error_screen_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!is_error_screen_quit(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)));
}

#[test]
fn chrome_helpers() {
    assert_eq!(view_title("Party", None), "─ Party ");
    assert_eq!(view_title("Output", Some(" (read-only) ")), "─ Output (read-only) ");
    assert_eq!(footer_label_ucfirst("GENERATE"), "Generate");
    assert_eq!(
        panel_border_style_for_focus(Focus::Party, Focus::Party).fg,
        Some(Color::LightGreen)
    );
    assert_eq!(panel_border_style_for_focus(Focus::Party, Focus::Tone).fg, None);
}
