//! Page model: the output of one render pass.
//!
//! Views never print. They return a [`Page`]: an ordered list of widgets that
//! the terminal renderer, the web dashboard, or `--format json` presents.

use serde::Serialize;
use serde_json::Value;

/// Severity of a notice box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

/// One labelled scalar in a metrics row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// One tab of a tab strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub label: String,
    pub markdown: String,
}

/// One labelled bar or point of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: usize,
}

/// A maintenance action a button triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Export,
    Cleanup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Title { text: String },
    Header { text: String },
    Subheader { text: String },
    Markdown { text: String },
    Notice { level: Level, text: String },
    /// Single-choice selector; `selected` is always one of `options` or `None`.
    Select {
        label: String,
        options: Vec<String>,
        selected: Option<String>,
    },
    Tabs { tabs: Vec<Tab> },
    Expander { label: String, markdown: String },
    Metrics { metrics: Vec<Metric> },
    Json { value: Value },
    BarChart { title: String, points: Vec<ChartPoint> },
    LineChart { title: String, points: Vec<ChartPoint> },
    NumberInput { label: String, min: u32, value: u32 },
    Button { label: String, action: ButtonAction },
    Divider,
}

/// Ordered widgets produced by a render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub widgets: Vec<Widget>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    /// Append all widgets of another page.
    pub fn extend(&mut self, other: Page) {
        self.widgets.extend(other.widgets);
    }

    pub fn title(&mut self, text: impl Into<String>) {
        self.push(Widget::Title { text: text.into() });
    }

    pub fn header(&mut self, text: impl Into<String>) {
        self.push(Widget::Header { text: text.into() });
    }

    pub fn subheader(&mut self, text: impl Into<String>) {
        self.push(Widget::Subheader { text: text.into() });
    }

    pub fn markdown(&mut self, text: impl Into<String>) {
        self.push(Widget::Markdown { text: text.into() });
    }

    pub fn notice(&mut self, level: Level, text: impl Into<String>) {
        self.push(Widget::Notice {
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice(Level::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notice(Level::Success, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.notice(Level::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice(Level::Error, text);
    }

    pub fn json(&mut self, value: Value) {
        self.push(Widget::Json { value });
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Texts of all notices at `level`, in order.
    pub fn notices(&self, level: Level) -> Vec<&str> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Notice { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Value of the first metric with the given label.
    pub fn metric(&self, label: &str) -> Option<&str> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Metrics { metrics } => metrics
                .iter()
                .find(|m| m.label == label)
                .map(|m| m.value.as_str()),
            _ => None,
        })
    }

    /// The first selector on the page.
    pub fn select(&self) -> Option<(&[String], Option<&str>)> {
        self.widgets.iter().find_map(|w| match w {
            Widget::Select {
                options, selected, ..
            } => Some((options.as_slice(), selected.as_deref())),
            _ => None,
        })
    }

    pub fn has_select(&self) -> bool {
        self.select().is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
