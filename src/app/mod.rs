//! Application core: the polling state machine.
//!
//! Everything the UI shows lives in [`App`], and it changes only inside
//! [`App::update`] in response to one of three message kinds: a key press, a
//! poll timer firing, or a probe completing. Transitions are synchronous;
//! probe and timer work comes back as [`Cmd`] values for the runtime to
//! spawn, so a slow endpoint can never stall the input path.
//!
//! The poll loop is a chain of single-shot timers: starting a poll issues
//! one probe and schedules one tick, and each tick that still matches the
//! live chain issues the next probe and the next tick. Stopping never
//! cancels anything; an orphaned tick fails the epoch check and dies.

pub mod form;
mod runtime;

pub use runtime::run;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::store::{PingResult, Profile, ProfileStore};
use form::FormBuffer;

/// Cap on the in-memory result feed, newest first.
pub const RESULT_BUFFER_CAP: usize = 20;

/// Entries on the main menu, in order.
pub const MENU_ITEMS: [&str; 3] = ["Select Profile", "Create New Profile", "Quit"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    MainMenu,
    ProfileList,
    CreateForm,
    EditForm,
    Running,
}

/// Every event the core reacts to.
#[derive(Debug)]
pub enum Msg {
    Key(KeyEvent),
    /// A single-shot poll timer fired. Carries the epoch of the chain that
    /// scheduled it so orphaned chains are ignored.
    Tick { epoch: u64 },
    ProbeDone(PingResult),
}

/// Side effects requested by a transition.
#[derive(Debug, PartialEq)]
pub enum Cmd {
    Quit,
    Probe(Profile),
    Schedule { after: Duration, epoch: u64 },
}

/// The single source of truth for the UI.
pub struct App {
    pub view: View,
    pub store: ProfileStore,
    pub menu_index: usize,
    pub profile_index: usize,
    pub form: FormBuffer,
    /// Profile selected for monitoring.
    pub current: Option<Profile>,
    pub running: bool,
    pub results: Vec<PingResult>,
    /// User-visible banner for store failures and validation messages.
    pub notice: Option<String>,
    epoch: u64,
}

impl App {
    pub fn new(store: ProfileStore) -> Self {
        Self {
            view: View::MainMenu,
            store,
            menu_index: 0,
            profile_index: 0,
            form: FormBuffer::default(),
            current: None,
            running: false,
            results: Vec::new(),
            notice: None,
            epoch: 0,
        }
    }

    /// Apply one message and return the effects it requests.
    pub fn update(&mut self, msg: Msg) -> Vec<Cmd> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Tick { epoch } => self.handle_tick(epoch),
            Msg::ProbeDone(result) => {
                // Recorded even when the poll was stopped mid-flight.
                self.results.insert(0, result);
                self.results.truncate(RESULT_BUFFER_CAP);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if is_quit_key(&key) {
            self.stop_polling();
            return vec![Cmd::Quit];
        }

        if key.code == KeyCode::Esc {
            return self.handle_esc();
        }

        match self.view {
            View::MainMenu => self.handle_menu_key(&key),
            View::ProfileList => self.handle_list_key(&key),
            View::CreateForm | View::EditForm => self.handle_form_key(&key),
            View::Running => self.handle_running_key(&key),
        }
    }

    fn handle_esc(&mut self) -> Vec<Cmd> {
        match self.view {
            View::ProfileList | View::CreateForm | View::EditForm => {
                self.view = View::MainMenu;
                self.menu_index = 0;
                self.notice = None;
            }
            View::Running => {
                self.stop_polling();
                self.view = View::MainMenu;
                self.menu_index = 0;
                self.notice = None;
            }
            View::MainMenu => {}
        }
        Vec::new()
    }

    fn handle_menu_key(&mut self, key: &KeyEvent) -> Vec<Cmd> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_index = self.menu_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_index = (self.menu_index + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => match self.menu_index {
                0 => {
                    self.view = View::ProfileList;
                    self.profile_index = 0;
                    self.notice = None;
                }
                1 => {
                    self.form.reset();
                    self.view = View::CreateForm;
                    self.notice = None;
                }
                _ => return vec![Cmd::Quit],
            },
            _ => {}
        }
        Vec::new()
    }

    fn handle_list_key(&mut self, key: &KeyEvent) -> Vec<Cmd> {
        let count = self.store.profiles().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.profile_index = self.profile_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if count > 0 && self.profile_index < count - 1 {
                    self.profile_index += 1;
                }
            }
            KeyCode::Enter if count > 0 => {
                self.current = Some(self.store.profiles()[self.profile_index].clone());
                self.view = View::Running;
                self.notice = None;
                return self.start_polling();
            }
            KeyCode::Char('e') if count > 0 => {
                let profile = self.store.profiles()[self.profile_index].clone();
                self.form.load(&profile);
                self.view = View::EditForm;
                self.notice = None;
            }
            KeyCode::Char('d') if count > 0 => {
                let name = self.store.profiles()[self.profile_index].name.clone();
                if let Err(e) = self.store.delete(&name) {
                    tracing::error!("failed to delete profile {name}: {e}");
                    self.notice = Some(format!("Failed to delete {name}: {e}"));
                }
                self.clamp_profile_index();
            }
            KeyCode::Char('c') => {
                self.form.reset();
                self.view = View::CreateForm;
                self.notice = None;
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_form_key(&mut self, key: &KeyEvent) -> Vec<Cmd> {
        match key.code {
            KeyCode::Up | KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.focus_next(),
            KeyCode::Enter => {
                if self.form.on_last_field() {
                    self.submit_form();
                } else {
                    self.form.focus_next();
                }
            }
            _ => self.form.handle_key(key),
        }
        Vec::new()
    }

    fn handle_running_key(&mut self, key: &KeyEvent) -> Vec<Cmd> {
        if key.code == KeyCode::Char('s') {
            if self.running {
                self.stop_polling();
            } else {
                return self.start_polling();
            }
        }
        Vec::new()
    }

    fn handle_tick(&mut self, epoch: u64) -> Vec<Cmd> {
        if !self.running || epoch != self.epoch {
            return Vec::new();
        }
        let Some(profile) = self.current.clone() else {
            return Vec::new();
        };
        vec![
            Cmd::Probe(profile.clone()),
            Cmd::Schedule {
                after: profile.interval_duration(),
                epoch,
            },
        ]
    }

    /// Parse the form and persist. Missing name or base URL blocks the
    /// transition; a store failure surfaces in the banner but the in-memory
    /// collection is already updated, so the flow continues.
    fn submit_form(&mut self) {
        let profile = self.form.to_profile();
        if profile.name.is_empty() || profile.base_url.is_empty() {
            self.notice = Some("Profile name and base URL are required".to_string());
            return;
        }

        let name = profile.name.clone();
        match self.store.add_or_replace(profile) {
            Ok(()) => {
                let verb = if self.form.is_editing() { "updated" } else { "created" };
                tracing::info!("{verb} profile {name}");
                self.notice = None;
            }
            Err(e) => {
                tracing::error!("failed to save profile {name}: {e}");
                self.notice = Some(format!("Failed to save {name}: {e}"));
            }
        }
        self.form.reset();
        self.view = View::MainMenu;
        self.menu_index = 0;
    }

    /// Begin a new poll chain: fresh epoch, cleared feed, one immediate
    /// probe, and one scheduled tick.
    fn start_polling(&mut self) -> Vec<Cmd> {
        let Some(profile) = self.current.clone() else {
            return Vec::new();
        };
        self.epoch += 1;
        self.running = true;
        self.results.clear();
        tracing::info!("starting poll loop for {}", profile.name);
        vec![
            Cmd::Probe(profile.clone()),
            Cmd::Schedule {
                after: profile.interval_duration(),
                epoch: self.epoch,
            },
        ]
    }

    /// Clearing the flag is the whole stop: the pending tick fails its
    /// epoch check and the chain ends there.
    fn stop_polling(&mut self) {
        if self.running {
            tracing::info!("stopping poll loop");
        }
        self.running = false;
    }

    fn clamp_profile_index(&mut self) {
        let count = self.store.profiles().len();
        if count == 0 {
            self.profile_index = 0;
        } else if self.profile_index >= count {
            self.profile_index = count - 1;
        }
    }
}

fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => !key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ch(c: char) -> Msg {
        key(KeyCode::Char(c))
    }

    fn result_with_status(status_code: u16) -> PingResult {
        PingResult {
            timestamp: Local::now(),
            status_code,
            success: (200..300).contains(&status_code),
            error: None,
            duration: Duration::from_millis(10),
        }
    }

    fn app_with_profiles(dir: &TempDir, names: &[&str]) -> App {
        let mut store = ProfileStore::open(dir.path().join("profiles.json")).unwrap();
        for name in names {
            store
                .add_or_replace(Profile {
                    name: name.to_string(),
                    base_url: "https://api.example.com".to_string(),
                    route: "/health".to_string(),
                    interval: 5,
                    ..Default::default()
                })
                .unwrap();
        }
        App::new(store)
    }

    #[test]
    fn test_menu_navigation_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &[]);

        app.update(key(KeyCode::Up));
        assert_eq!(app.menu_index, 0);

        for _ in 0..5 {
            app.update(key(KeyCode::Down));
        }
        assert_eq!(app.menu_index, MENU_ITEMS.len() - 1);
    }

    #[test]
    fn test_menu_enter_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &[]);

        app.update(key(KeyCode::Enter));
        assert_eq!(app.view, View::ProfileList);

        app.update(key(KeyCode::Esc));
        assert_eq!(app.view, View::MainMenu);

        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));
        assert_eq!(app.view, View::CreateForm);

        app.update(key(KeyCode::Esc));
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Down));
        let cmds = app.update(key(KeyCode::Enter));
        assert_eq!(cmds, vec![Cmd::Quit]);
    }

    #[test]
    fn test_quit_key_everywhere_outside_running() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &[]);
        assert_eq!(app.update(ch('q')), vec![Cmd::Quit]);

        app.view = View::CreateForm;
        assert_eq!(app.update(ch('q')), vec![Cmd::Quit]);

        let ctrl_c = Msg::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.update(ctrl_c), vec![Cmd::Quit]);
    }

    #[test]
    fn test_create_profile_through_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &[]);

        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));
        assert_eq!(app.view, View::CreateForm);

        for c in "api".chars() {
            app.update(ch(c));
        }
        // Enter advances focus until the last field, then saves.
        app.update(key(KeyCode::Enter));
        for c in "https://api.example.com".chars() {
            app.update(ch(c));
        }
        for _ in 0..4 {
            app.update(key(KeyCode::Enter));
        }
        assert_eq!(app.view, View::CreateForm);

        app.update(key(KeyCode::Enter));
        assert_eq!(app.view, View::MainMenu);
        assert_eq!(app.store.profiles().len(), 1);
        assert_eq!(app.store.profiles()[0].name, "api");
        assert_eq!(app.store.profiles()[0].interval, 5);
    }

    #[test]
    fn test_form_blocks_save_without_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &[]);
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        for _ in 0..5 {
            app.update(key(KeyCode::Tab));
        }
        app.update(key(KeyCode::Enter));

        assert_eq!(app.view, View::CreateForm);
        assert!(app.notice.is_some());
        assert!(app.store.profiles().is_empty());
    }

    #[test]
    fn test_edit_loads_selected_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["first", "second"]);
        app.view = View::ProfileList;

        app.update(key(KeyCode::Down));
        app.update(ch('e'));
        assert_eq!(app.view, View::EditForm);
        assert!(app.form.is_editing());
        assert_eq!(app.form.field(0).value(), "second");
    }

    #[test]
    fn test_delete_reclamps_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["first", "second"]);
        app.view = View::ProfileList;

        app.update(key(KeyCode::Down));
        assert_eq!(app.profile_index, 1);

        app.update(ch('d'));
        assert_eq!(app.store.profiles().len(), 1);
        assert_eq!(app.profile_index, 0);

        app.update(ch('d'));
        assert!(app.store.profiles().is_empty());
        assert_eq!(app.profile_index, 0);

        // Empty list: delete and enter are no-ops.
        assert!(app.update(ch('d')).is_empty());
        assert!(app.update(key(KeyCode::Enter)).is_empty());
        assert_eq!(app.view, View::ProfileList);
    }

    #[test]
    fn test_enter_on_profile_starts_polling() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;

        let cmds = app.update(key(KeyCode::Enter));
        assert_eq!(app.view, View::Running);
        assert!(app.running);
        assert_eq!(cmds.len(), 2);
        assert!(matches!(&cmds[0], Cmd::Probe(p) if p.name == "api"));
        assert!(matches!(
            cmds[1],
            Cmd::Schedule {
                after,
                epoch: 1,
            } if after == Duration::from_secs(300)
        ));
    }

    #[test]
    fn test_stop_then_stale_tick_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;
        app.update(key(KeyCode::Enter));

        app.update(ch('s'));
        assert!(!app.running);
        assert_eq!(app.view, View::Running);
        assert!(app.results.len() <= 1);

        assert!(app.update(Msg::Tick { epoch: 1 }).is_empty());
    }

    #[test]
    fn test_restart_ignores_previous_chain() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;
        app.update(key(KeyCode::Enter));

        app.update(ch('s'));
        let cmds = app.update(ch('s'));
        assert!(app.running);
        assert_eq!(cmds.len(), 2);

        // The first chain's tick arrives late: dead.
        assert!(app.update(Msg::Tick { epoch: 1 }).is_empty());

        // The live chain's tick keeps the loop going.
        let cmds = app.update(Msg::Tick { epoch: 2 });
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], Cmd::Schedule { epoch: 2, .. }));
    }

    #[test]
    fn test_result_buffer_is_bounded_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);

        for status in 0..25u16 {
            app.update(Msg::ProbeDone(result_with_status(200 + status)));
        }
        assert_eq!(app.results.len(), RESULT_BUFFER_CAP);
        assert_eq!(app.results[0].status_code, 224);
        assert_eq!(app.results[RESULT_BUFFER_CAP - 1].status_code, 205);
    }

    #[test]
    fn test_result_recorded_after_stop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;
        app.update(key(KeyCode::Enter));
        app.update(key(KeyCode::Esc));
        assert_eq!(app.view, View::MainMenu);
        assert!(!app.running);

        app.update(Msg::ProbeDone(result_with_status(503)));
        assert_eq!(app.results.len(), 1);
        assert!(!app.results[0].success);
    }

    #[test]
    fn test_start_clears_previous_feed() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;
        app.update(key(KeyCode::Enter));
        app.update(Msg::ProbeDone(result_with_status(200)));
        assert_eq!(app.results.len(), 1);

        app.update(ch('s'));
        app.update(ch('s'));
        assert!(app.results.is_empty());
    }

    #[test]
    fn test_quit_from_running_stops_polling() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_profiles(&dir, &["api"]);
        app.view = View::ProfileList;
        app.update(key(KeyCode::Enter));
        assert!(app.running);

        let cmds = app.update(ch('q'));
        assert_eq!(cmds, vec![Cmd::Quit]);
        assert!(!app.running);
    }
}
