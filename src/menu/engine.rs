use super::error::{MenuError, Result};
use super::error_panel::ErrorPanel;
use super::signal::Signal;
use super::submenu::Submenu;
use crate::context::Context;
use crate::layout::Dimensions;
use crate::state::StateStore;
use log::{debug, info, warn};
use std::collections::{HashMap, VecDeque};

/// Follow-up signals handled for one incoming signal before giving up
const MAX_CHAINED_SIGNALS: usize = 16;

/// Handler run for `Abort` signals
pub type AbortHandler = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Stopped,
}

/// Navigation state machine. Owns every submenu for the whole run; `current`,
/// `root` and the `history` stack are indices into that registry.
pub struct Menu {
    submenus: Vec<Submenu>,
    tree: HashMap<String, usize>,
    root: usize,
    current: usize,
    history: Vec<usize>,
    error_panel: ErrorPanel,
    screen: Dimensions,
    state: MenuState,
    redraw: bool,
    context: Option<Box<dyn Context>>,
    store: Option<Box<dyn StateStore>>,
    abort_handler: Option<AbortHandler>,
}

impl Menu {
    /// Create a menu over `submenus`, starting at the one with uid `root`
    pub fn new(submenus: Vec<Submenu>, root: &str) -> Result<Self> {
        let mut tree = HashMap::new();
        for (index, submenu) in submenus.iter().enumerate() {
            if tree.insert(submenu.uid().to_string(), index).is_some() {
                warn!("Duplicate submenu uid {}, keeping the last one", submenu.uid());
            }
        }

        let root = *tree
            .get(root)
            .ok_or_else(|| MenuError::InvalidTarget(root.to_string()))?;

        Ok(Self {
            submenus,
            tree,
            root,
            current: root,
            history: vec![root],
            error_panel: ErrorPanel::default(),
            screen: Dimensions::default(),
            state: MenuState::Running,
            redraw: true,
            context: None,
            store: None,
            abort_handler: None,
        })
    }

    pub fn with_error_panel(mut self, panel: ErrorPanel) -> Self {
        self.error_panel = panel;
        self
    }

    pub fn with_context(mut self, context: Box<dyn Context>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_state(mut self, store: Box<dyn StateStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_abort_handler<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.abort_handler = Some(Box::new(handler));
        self
    }

    pub fn is_running(&self) -> bool {
        self.state == MenuState::Running
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn current(&self) -> &Submenu {
        &self.submenus[self.current]
    }

    pub fn root(&self) -> &Submenu {
        &self.submenus[self.root]
    }

    pub fn submenu(&self, uid: &str) -> Option<&Submenu> {
        self.tree.get(uid).map(|&index| &self.submenus[index])
    }

    /// Mutable access for changing a submenu's option set
    pub fn submenu_mut(&mut self, uid: &str) -> Option<&mut Submenu> {
        let index = *self.tree.get(uid)?;
        if index == self.current {
            self.redraw = true;
        }
        Some(&mut self.submenus[index])
    }

    /// Uids of the navigation history, oldest first
    pub fn history(&self) -> Vec<&str> {
        self.history
            .iter()
            .map(|&index| self.submenus[index].uid())
            .collect()
    }

    pub fn error_panel(&self) -> &ErrorPanel {
        &self.error_panel
    }

    pub fn screen_size(&self) -> Dimensions {
        self.screen
    }

    /// Whether something changed since the last render
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Record a new terminal size. Only the current submenu is resized now;
    /// the others pick the size up when they become current.
    pub fn update_screen_size(&mut self, lines: usize, columns: usize) {
        self.screen = Dimensions::new(lines, columns);
        self.submenus[self.current].update_screen_size(self.screen);
        self.redraw = true;
    }

    /// Signal for option `index` of the current submenu
    pub fn select(&self, index: u32) -> Result<Signal> {
        self.current().select(index).ok_or_else(|| {
            MenuError::InputRead(format!(
                "{} has no option {}",
                self.current().uid(),
                index
            ))
        })
    }

    /// Apply `signal` and every signal it leads to.
    ///
    /// Returns the error signals raised along the way; each has also been
    /// queued on the error panel.
    pub fn handle_signal(&mut self, signal: Signal) -> Vec<Signal> {
        let mut raised = Vec::new();
        let mut queue = VecDeque::from([signal]);
        let mut handled = 0;

        while let Some(signal) = queue.pop_front() {
            handled += 1;
            if handled > MAX_CHAINED_SIGNALS {
                warn!(
                    "Signal chain exceeded {} steps, dropping the rest",
                    MAX_CHAINED_SIGNALS
                );
                break;
            }

            if let Some(next) = self.apply(signal) {
                if next.is_error() {
                    raised.push(next.clone());
                }
                queue.push_back(next);
            }
        }

        raised
    }

    fn apply(&mut self, signal: Signal) -> Option<Signal> {
        debug!("{} handling {:?}", self.current().uid(), signal);
        match signal {
            Signal::SwitchSubmenu(target) => self.switch_to(&target),
            Signal::ReturnToPrevious => {
                if self.history.len() > 1 {
                    self.history.pop();
                }
                let previous = self.history.last().copied().unwrap_or(self.root);
                self.activate(previous);
                None
            }
            Signal::ReturnToMain => {
                self.activate(self.root);
                None
            }
            Signal::Quit => {
                info!("Quit requested from {}", self.current().uid());
                self.state = MenuState::Stopped;
                None
            }
            Signal::Abort(reason) => {
                match self.abort_handler.as_mut() {
                    Some(handler) => handler(&reason),
                    None => debug!("Abort ({}) ignored, no handler registered", reason),
                }
                None
            }
            Signal::Ok(_) | Signal::Do { .. } => self.forward(signal),
            Signal::Error { .. } => {
                warn!("{:?}", signal);
                self.error_panel.show(signal);
                self.redraw = true;
                None
            }
        }
    }

    fn switch_to(&mut self, target: &str) -> Option<Signal> {
        match self.tree.get(target).copied() {
            Some(index) => {
                self.history.push(index);
                self.activate(index);
                None
            }
            None => Some(
                MenuError::InvalidTarget(target.to_string()).into_signal(self.current().uid()),
            ),
        }
    }

    fn activate(&mut self, index: usize) {
        self.current = index;
        self.submenus[index].update_screen_size(self.screen);
        self.redraw = true;
    }

    fn forward(&mut self, signal: Signal) -> Option<Signal> {
        let Some(context) = self.context.as_mut() else {
            return Some(
                MenuError::NoContext(format!("{:?}", signal)).into_signal(self.current().uid()),
            );
        };

        self.redraw = true;
        match context.dispatch(&signal) {
            Some(Signal::Ok(Some(payload))) => {
                match self.store.as_mut() {
                    Some(store) => store.update(&payload),
                    None => debug!("No state store, dropping payload {:?}", payload),
                }
                None
            }
            Some(Signal::Ok(None)) | None => None,
            Some(response) => Some(response),
        }
    }

    /// Save persisted state. A failure is shown on the error panel and returned.
    pub fn persist(&mut self) -> Option<Signal> {
        let store = self.store.as_mut()?;
        match store.save() {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to save state: {}", e);
                let signal = e.into_signal("state");
                self.error_panel.show(signal.clone());
                self.redraw = true;
                Some(signal)
            }
        }
    }

    /// Compose the frame: pending error panel (shown once) above the current submenu
    pub fn render(&mut self) -> Result<String> {
        let current = &self.submenus[self.current];
        let body = current.render()?;
        let frame = match self.error_panel.render(current.dimensions())? {
            Some(error) => format!("{}\n{}", error, body),
            None => body,
        };

        self.error_panel.clear();
        self.redraw = false;
        Ok(frame)
    }

    /// Render the pending error panel on its own and consume it
    pub fn take_error_frame(&mut self) -> Result<Option<String>> {
        let frame = self
            .error_panel
            .render(self.submenus[self.current].dimensions())?;
        self.error_panel.clear();
        Ok(frame)
    }
}
