use super::error::Result;
use super::signal::Signal;
use crate::layout::{render_panel, stack_panels, Dimensions, PanelStyle};

/// What choosing an option does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionTarget {
    /// Open another submenu by uid
    Submenu(String),
    /// Go back one step
    Previous,
    /// Go to the root submenu
    Main,
    /// Stop the application
    Quit,
    /// Run the action registered for this option
    Action,
    /// Hand over to the abort handler
    Abort(String),
}

/// A numbered, selectable entry of a submenu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Number the user types to choose the option
    pub index: u32,
    /// Stable id, used in action signatures
    pub id: String,
    pub label: String,
    pub target: OptionTarget,
}

impl MenuOption {
    pub fn new(index: u32, id: &str, label: &str, target: OptionTarget) -> Self {
        Self {
            index,
            id: id.to_string(),
            label: label.to_string(),
            target,
        }
    }

    /// Option opening the submenu `target`
    pub fn submenu(index: u32, label: &str, target: &str) -> Self {
        Self::new(index, target, label, OptionTarget::Submenu(target.to_string()))
    }

    /// Option running the action `"<submenu>.<id>"`
    pub fn action(index: u32, id: &str, label: &str) -> Self {
        Self::new(index, id, label, OptionTarget::Action)
    }

    pub fn back(index: u32, label: &str) -> Self {
        Self::new(index, "back", label, OptionTarget::Previous)
    }

    pub fn main(index: u32, label: &str) -> Self {
        Self::new(index, "main", label, OptionTarget::Main)
    }

    pub fn quit(index: u32, label: &str) -> Self {
        Self::new(index, "quit", label, OptionTarget::Quit)
    }

    /// Text shown for this option in the content panel
    pub fn line(&self) -> String {
        format!("{} > {}", self.index, self.label)
    }
}

/// One navigable screen: header, numbered options and footer
#[derive(Debug, Clone)]
pub struct Submenu {
    uid: String,
    title: String,
    subtitle: String,
    message: String,
    options: Vec<MenuOption>,
    footer: String,
    style: PanelStyle,
    dimensions: Dimensions,
}

impl Submenu {
    pub fn new(uid: &str, title: &str) -> Self {
        Self {
            uid: uid.to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            message: String::new(),
            options: Vec::new(),
            footer: String::new(),
            style: PanelStyle::default(),
            dimensions: Dimensions::default(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str) -> Self {
        self.subtitle = subtitle.to_string();
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn with_footer(mut self, footer: &str) -> Self {
        self.footer = footer.to_string();
        self
    }

    pub fn with_option(mut self, option: MenuOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    /// Replace the option set
    pub fn set_options(&mut self, options: Vec<MenuOption>) {
        self.options = options;
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn update_screen_size(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
    }

    /// Signal produced by choosing option `index`, if there is such an option
    pub fn select(&self, index: u32) -> Option<Signal> {
        let option = self.options.iter().find(|o| o.index == index)?;
        let signal = match &option.target {
            OptionTarget::Submenu(target) => Signal::switch_to(target.clone()),
            OptionTarget::Previous => Signal::ReturnToPrevious,
            OptionTarget::Main => Signal::ReturnToMain,
            OptionTarget::Quit => Signal::Quit,
            OptionTarget::Action => Signal::action(&self.uid, &option.id),
            OptionTarget::Abort(reason) => Signal::Abort(reason.clone()),
        };
        Some(signal)
    }

    /// Header, options and footer as stacked panels at the stored dimensions
    pub fn render(&self) -> Result<String> {
        let header: Vec<&str> = [&self.title, &self.subtitle, &self.message]
            .into_iter()
            .map(String::as_str)
            .filter(|text| !text.is_empty())
            .collect();
        let content: Vec<String> = self.options.iter().map(MenuOption::line).collect();

        let mut panels = vec![render_panel(&header, self.dimensions, &self.style)?];
        if !content.is_empty() {
            panels.push(render_panel(&content, self.dimensions, &self.style)?);
        }
        if !self.footer.is_empty() {
            panels.push(render_panel(&[&self.footer], self.dimensions, &self.style)?);
        }

        Ok(stack_panels(&panels, &self.style.border))
    }
}
