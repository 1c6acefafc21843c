//! Demo application for ace-view.
//!
//! The Ace page runs on the headless engine; an iced text editor stands in
//! for the web view and mirrors every edit into it. The layout is:
//! - A toolbar with file actions and the mode, theme and keyboard pickers
//! - An option bar and the editor
//! - A find/replace bar
//! - An output pane collecting change notifications and script exceptions

use ace_view::{
    AceKeyboardHandler, AceMode, AceTheme, AceView, HeadlessEngine, NewLineMode, ScriptException,
    SearchOptions, TextRange, ViewError,
};
use iced::widget::{
    Space, button, checkbox, column, container, pick_list, row, scrollable, text, text_editor,
    text_input,
};
use iced::{Color, Element, Length, Task, Theme};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Main entry point for the demo application.
fn main() -> iced::Result {
    iced::application(DemoApp::new, DemoApp::update, DemoApp::view)
        .theme(DemoApp::theme)
        .run()
}

const TAB_SIZES: [usize; 3] = [2, 4, 8];
const FONT_SIZES: [usize; 5] = [10, 12, 14, 16, 20];

/// Code templates available in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Template {
    Empty,
    HelloWorld,
    Fibonacci,
}

impl Template {
    const ALL: [Template; 3] = [Template::Empty, Template::HelloWorld, Template::Fibonacci];

    fn name(self) -> &'static str {
        match self {
            Template::Empty => "Empty",
            Template::HelloWorld => "Hello World",
            Template::Fibonacci => "Fibonacci",
        }
    }

    fn mode(self) -> AceMode {
        match self {
            Template::Empty => AceMode::Text,
            Template::HelloWorld | Template::Fibonacci => AceMode::Python,
        }
    }

    fn content(self) -> &'static str {
        match self {
            Template::Empty => "",
            Template::HelloWorld => "# Hello World in Python\nprint(\"Hello, World!\")\n",
            Template::Fibonacci => {
                r#"# Fibonacci sequence in Python
def fibonacci(n):
    if n <= 1:
        return n
    return fibonacci(n - 1) + fibonacci(n - 2)

for i in range(10):
    print(f"fib({i}) = {fibonacci(i)}")
"#
            }
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Boolean editor options exposed as checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorOption {
    SoftWrap,
    ShowInvisibles,
    LineNumbers,
    SoftTabs,
    ReadOnly,
}

impl EditorOption {
    const ALL: [EditorOption; 5] = [
        EditorOption::SoftWrap,
        EditorOption::ShowInvisibles,
        EditorOption::LineNumbers,
        EditorOption::SoftTabs,
        EditorOption::ReadOnly,
    ];

    fn label(self) -> &'static str {
        match self {
            EditorOption::SoftWrap => "Soft wrap",
            EditorOption::ShowInvisibles => "Show invisibles",
            EditorOption::LineNumbers => "Line numbers",
            EditorOption::SoftTabs => "Soft tabs",
            EditorOption::ReadOnly => "Read only",
        }
    }

    fn get(self, view: &AceView) -> Result<bool, ViewError> {
        match self {
            EditorOption::SoftWrap => view.use_wrap_mode(),
            EditorOption::ShowInvisibles => view.show_invisibles(),
            EditorOption::LineNumbers => view.show_line_numbers(),
            EditorOption::SoftTabs => view.use_soft_tabs(),
            EditorOption::ReadOnly => view.read_only(),
        }
    }

    fn set(self, view: &AceView, enabled: bool) -> Result<(), ViewError> {
        match self {
            EditorOption::SoftWrap => view.set_use_wrap_mode(enabled),
            EditorOption::ShowInvisibles => view.set_show_invisibles(enabled),
            EditorOption::LineNumbers => view.set_show_line_numbers(enabled),
            EditorOption::SoftTabs => view.set_use_soft_tabs(enabled),
            EditorOption::ReadOnly => view.set_read_only(enabled),
        }
    }
}

/// Demo application state.
struct DemoApp {
    /// The bridged editor view
    view: AceView,
    /// Native mirror of the editor text
    content: text_editor::Content,
    /// Current file path
    current_file: Option<PathBuf>,
    /// Error message
    error_message: Option<String>,
    /// Find bar needle
    search: String,
    /// Replace bar text
    replacement: String,
    case_sensitive: bool,
    whole_word: bool,
    reg_exp: bool,
    /// Messages pushed by view callbacks, drained after every update
    pending_log: Rc<RefCell<Vec<String>>>,
    /// Log messages for output pane
    log_messages: Vec<String>,
}

/// Application messages.
#[derive(Debug, Clone)]
enum Message {
    /// Native editor action
    Edit(text_editor::Action),
    /// Open file
    OpenFile,
    /// File opened
    FileOpened(Result<(PathBuf, String), String>),
    /// Save file
    SaveFile,
    /// Save file as
    SaveFileAs,
    /// File saved
    FileSaved(Result<PathBuf, String>),
    /// Template selected
    TemplateSelected(Template),
    ModeSelected(AceMode),
    ThemeSelected(AceTheme),
    KeyboardHandlerSelected(AceKeyboardHandler),
    NewLineModeSelected(NewLineMode),
    TabSizeSelected(usize),
    FontSizeSelected(usize),
    /// Editor option toggled
    ToggleOption(EditorOption, bool),
    SearchChanged(String),
    ReplacementChanged(String),
    ToggleCaseSensitive(bool),
    ToggleWholeWord(bool),
    ToggleRegExp(bool),
    /// List every match in the output pane
    FindAll,
    /// Replace every match
    ReplaceAll,
    /// Clear log
    ClearLog,
}

impl DemoApp {
    /// Creates a new instance of the application.
    fn new() -> (Self, Task<Message>) {
        let pending_log = Rc::new(RefCell::new(Vec::new()));
        let view = AceView::new();

        let sink = Rc::clone(&pending_log);
        view.on_text_change(move |notification| {
            sink.borrow_mut().push(format!("[CHANGE] {} {}", notification.sender, notification.name));
        });

        let sink = Rc::clone(&pending_log);
        view.on_ready(move |view| {
            sink.borrow_mut().push(format!("[INFO] {} finished loading", view.id()));
        });

        view.did_finish_load(Box::new(HeadlessEngine::new()));

        let sink = Rc::clone(&pending_log);
        let handler = view.set_exception_handler(Box::new(move |exception: &ScriptException| {
            sink.borrow_mut().push(format!("[ERROR] Context exception: {exception}"));
        }));

        let template = Template::Fibonacci;
        let mut app = Self {
            view,
            content: text_editor::Content::with_text(template.content()),
            current_file: None,
            error_message: None,
            search: String::new(),
            replacement: String::new(),
            case_sensitive: false,
            whole_word: false,
            reg_exp: false,
            pending_log,
            log_messages: Vec::new(),
        };
        if let Err(err) = handler {
            app.log("ERROR", &err.to_string());
        }
        app.load_text(template.content(), template.mode());
        app.drain_pending_log();
        (app, Task::none())
    }

    /// Adds a log message.
    fn log(&mut self, level: &str, message: &str) {
        self.log_messages.push(format!("[{level}] {message}"));
    }

    /// Moves messages recorded by view callbacks into the output pane.
    fn drain_pending_log(&mut self) {
        let pending: Vec<String> = self.pending_log.borrow_mut().drain(..).collect();
        self.log_messages.extend(pending);
    }

    /// Reports a failed view call.
    fn check(&mut self, result: Result<(), ViewError>) {
        if let Err(err) = result {
            self.log("ERROR", &err.to_string());
            self.error_message = Some(err.to_string());
        }
    }

    /// Replaces the whole document, resetting undo history.
    fn load_text(&mut self, content: &str, mode: AceMode) {
        self.content = text_editor::Content::with_text(content);
        let result = self.view.set_string(content).and_then(|()| self.view.set_mode(mode));
        self.check(result);
    }

    /// Pulls the view's text back into the native editor.
    fn reload_from_view(&mut self) {
        match self.view.string() {
            Ok(content) => self.content = text_editor::Content::with_text(&content),
            Err(err) => self.check(Err(err)),
        }
    }

    fn search_options(&self) -> SearchOptions {
        SearchOptions::new(&self.search)
            .case_sensitive(self.case_sensitive)
            .whole_word(self.whole_word)
            .reg_exp(self.reg_exp)
    }

    /// Handles messages and updates the application state.
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Edit(action) => {
                let is_edit = action.is_edit();
                self.content.perform(action);
                if is_edit {
                    let result = self.view.string().and_then(|current| {
                        let whole = TextRange::new(0, current.chars().count());
                        self.view.replace_characters(whole, &self.content.text())
                    });
                    self.check(result);
                }
                Task::none()
            }
            Message::OpenFile => {
                self.log("INFO", "Opening file...");
                Task::perform(open_file_dialog(), Message::FileOpened)
            }
            Message::FileOpened(result) => {
                match result {
                    Ok((path, content)) => {
                        self.log("INFO", &format!("Opened {}", path.display()));
                        self.load_text(&content, mode_for_path(&path));
                        self.current_file = Some(path);
                        self.error_message = None;
                    }
                    Err(err) => {
                        self.log("ERROR", &err);
                        self.error_message = Some(err);
                    }
                }
                Task::none()
            }
            Message::SaveFile => {
                if let Some(path) = self.current_file.clone() {
                    self.log("INFO", &format!("Saving to: {}", path.display()));
                    Task::perform(save_file(path, self.content.text()), Message::FileSaved)
                } else {
                    self.update(Message::SaveFileAs)
                }
            }
            Message::SaveFileAs => {
                self.log("INFO", "Opening save dialog...");
                Task::perform(save_file_as_dialog(self.content.text()), Message::FileSaved)
            }
            Message::FileSaved(result) => {
                match result {
                    Ok(path) => {
                        self.log("INFO", &format!("Saved: {}", path.display()));
                        self.current_file = Some(path);
                        self.error_message = None;
                    }
                    Err(err) => {
                        self.log("ERROR", &err);
                        self.error_message = Some(err);
                    }
                }
                Task::none()
            }
            Message::TemplateSelected(template) => {
                self.log("INFO", &format!("Loaded template: {template}"));
                self.load_text(template.content(), template.mode());
                self.current_file = None;
                Task::none()
            }
            Message::ModeSelected(mode) => {
                let result = self.view.set_mode(mode);
                self.check(result);
                Task::none()
            }
            Message::ThemeSelected(theme) => {
                let result = self.view.set_theme(theme);
                self.check(result);
                Task::none()
            }
            Message::KeyboardHandlerSelected(handler) => {
                let result = self.view.set_keyboard_handler(handler);
                self.check(result);
                Task::none()
            }
            Message::NewLineModeSelected(mode) => {
                let result = self.view.set_new_line_mode(mode);
                self.check(result);
                Task::none()
            }
            Message::TabSizeSelected(size) => {
                let result = self.view.set_tab_size(size);
                self.check(result);
                Task::none()
            }
            Message::FontSizeSelected(size) => {
                let result = self.view.set_font_size(size);
                self.check(result);
                Task::none()
            }
            Message::ToggleOption(option, enabled) => {
                let result = option.set(&self.view, enabled);
                self.check(result);
                Task::none()
            }
            Message::SearchChanged(search) => {
                self.search = search;
                Task::none()
            }
            Message::ReplacementChanged(replacement) => {
                self.replacement = replacement;
                Task::none()
            }
            Message::ToggleCaseSensitive(enabled) => {
                self.case_sensitive = enabled;
                Task::none()
            }
            Message::ToggleWholeWord(enabled) => {
                self.whole_word = enabled;
                Task::none()
            }
            Message::ToggleRegExp(enabled) => {
                self.reg_exp = enabled;
                Task::none()
            }
            Message::FindAll => {
                match self.view.find_all(&self.search_options()) {
                    Ok(matches) => {
                        self.log("OUTPUT", &format!("{} matches for {:?}", matches.len(), self.search));
                        for found in &matches {
                            self.log(
                                "OUTPUT",
                                &format!(
                                    "  {}:{} to {}:{}",
                                    found.start_row + 1,
                                    found.start_column,
                                    found.end_row + 1,
                                    found.end_column
                                ),
                            );
                        }
                        if let Some(first) = matches.first() {
                            let result = self.view.go_to_line(first.start_row + 1, first.start_column, true);
                            self.check(result);
                        }
                    }
                    Err(err) => self.check(Err(err)),
                }
                Task::none()
            }
            Message::ReplaceAll => {
                match self.view.replace_all(&self.replacement, &self.search_options()) {
                    Ok(count) => {
                        self.log("OUTPUT", &format!("Replaced {count} occurrences"));
                        self.reload_from_view();
                    }
                    Err(err) => self.check(Err(err)),
                }
                Task::none()
            }
            Message::ClearLog => {
                self.log_messages.clear();
                Task::none()
            }
        };
        self.drain_pending_log();
        task
    }

    fn theme(&self) -> Theme {
        match self.view.theme() {
            Ok(theme) if theme.is_dark() => Theme::TokyoNightStorm,
            _ => Theme::Light,
        }
    }

    /// Renders the user interface.
    fn view(&self) -> Element<'_, Message> {
        let mode = self.view.mode().ok().flatten();
        let toolbar = row![
            button(text("Open")).on_press(Message::OpenFile),
            button(text("Save")).on_press(Message::SaveFile),
            button(text("Save As")).on_press(Message::SaveFileAs),
            text(self.file_status()),
            Space::new().width(Length::Fill),
            pick_list(Template::ALL, None::<Template>, Message::TemplateSelected)
                .placeholder("Choose template..."),
            text("Mode:"),
            pick_list(AceMode::ALL, mode, Message::ModeSelected),
            text("Theme:"),
            pick_list(AceTheme::ALL, self.view.theme().ok(), Message::ThemeSelected),
            text("Keys:"),
            pick_list(
                AceKeyboardHandler::ALL,
                self.view.keyboard_handler().ok(),
                Message::KeyboardHandlerSelected
            ),
        ]
        .spacing(10)
        .padding(10)
        .align_y(iced::Center);

        let error_bar = if let Some(err) = &self.error_message {
            container(text(format!("Error: {err}")).style(|_| text::Style {
                color: Some(Color::from_rgb(1.0, 0.3, 0.3)),
            }))
            .padding(5)
            .width(Length::Fill)
        } else {
            container(text("")).height(0)
        };

        let options = EditorOption::ALL.iter().fold(row![].spacing(10), |bar, &option| {
            let enabled = option.get(&self.view).unwrap_or_default();
            bar.push(
                checkbox(enabled)
                    .label(option.label())
                    .on_toggle(move |b| Message::ToggleOption(option, b))
                    .text_size(14),
            )
        });
        let option_bar = options
            .push(pick_list(
                NewLineMode::ALL,
                self.view.new_line_mode().ok(),
                Message::NewLineModeSelected,
            ))
            .push(text("Tab size:"))
            .push(pick_list(TAB_SIZES, self.view.tab_size().ok(), Message::TabSizeSelected))
            .push(text("Font size:"))
            .push(pick_list(FONT_SIZES, self.view.font_size().ok(), Message::FontSizeSelected))
            .padding(10)
            .align_y(iced::Center);

        let editor = container(
            text_editor(&self.content)
                .on_action(Message::Edit)
                .font(iced::Font::MONOSPACE)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::FillPortion(7))
        .clip(true);

        let find_bar = row![
            text_input("Find", &self.search).on_input(Message::SearchChanged).width(200),
            text_input("Replace", &self.replacement)
                .on_input(Message::ReplacementChanged)
                .width(200),
            checkbox(self.case_sensitive)
                .label("Case")
                .on_toggle(Message::ToggleCaseSensitive)
                .text_size(14),
            checkbox(self.whole_word)
                .label("Word")
                .on_toggle(Message::ToggleWholeWord)
                .text_size(14),
            checkbox(self.reg_exp)
                .label("Regex")
                .on_toggle(Message::ToggleRegExp)
                .text_size(14),
            button(text("Find All")).on_press(Message::FindAll),
            button(text("Replace All")).on_press(Message::ReplaceAll),
        ]
        .spacing(10)
        .padding(10)
        .align_y(iced::Center);

        container(
            column![toolbar, error_bar, option_bar, editor, find_bar, self.view_output_pane()]
                .spacing(2)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    /// Renders the output pane content.
    fn view_output_pane(&self) -> Element<'_, Message> {
        let toolbar = row![
            text("Output"),
            Space::new().width(Length::Fill),
            button(text("Clear").size(12)).on_press(Message::ClearLog).padding(4),
        ]
        .padding(5)
        .align_y(iced::Center);

        let log_content: Vec<Element<'_, Message>> = self
            .log_messages
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[ERROR]") {
                    Some(Color::from_rgb(1.0, 0.4, 0.4))
                } else if msg.starts_with("[OUTPUT]") {
                    Some(Color::from_rgb(0.4, 1.0, 0.4))
                } else {
                    None
                };
                text(msg.as_str()).size(13).style(move |_| text::Style { color }).into()
            })
            .collect();

        let log_scrollable =
            scrollable(column(log_content).spacing(2).padding(10).width(Length::Fill))
                .height(Length::Fill)
                .width(Length::Fill);

        column![toolbar, log_scrollable]
            .width(Length::Fill)
            .height(Length::FillPortion(3))
            .into()
    }

    /// Returns the file status string.
    fn file_status(&self) -> String {
        let name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("New file");
        let lines = self.view.length().unwrap_or_default();
        format!("{name} ({lines} lines)")
    }
}

/// Picks a mode from a file extension.
fn mode_for_path(path: &Path) -> AceMode {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "py" => AceMode::Python,
        "js" | "mjs" => AceMode::JavaScript,
        "ts" => AceMode::Typescript,
        "json" => AceMode::Json,
        "html" | "htm" => AceMode::Html,
        "css" => AceMode::Css,
        "md" | "markdown" => AceMode::Markdown,
        "c" | "cc" | "cpp" | "h" | "hpp" => AceMode::Cpp,
        "java" => AceMode::Java,
        "go" => AceMode::Golang,
        "lua" => AceMode::Lua,
        "rb" => AceMode::Ruby,
        "sh" | "bash" => AceMode::Sh,
        "sql" => AceMode::Sql,
        "swift" => AceMode::Swift,
        "xml" => AceMode::Xml,
        "yml" | "yaml" => AceMode::Yaml,
        _ => AceMode::Text,
    }
}

/// Opens a file dialog.
async fn open_file_dialog() -> Result<(PathBuf, String), String> {
    let file = rfd::AsyncFileDialog::new()
        .add_filter("All Files", &["*"])
        .set_title("Open File")
        .pick_file()
        .await;

    if let Some(file) = file {
        let path = file.path().to_path_buf();
        let content =
            std::fs::read_to_string(&path).map_err(|e| format!("Unable to read file: {e}"))?;
        Ok((path, content))
    } else {
        Err("No file selected".to_string())
    }
}

/// Saves content to a file.
async fn save_file(path: PathBuf, content: String) -> Result<PathBuf, String> {
    std::fs::write(&path, content).map_err(|e| format!("Unable to write file: {e}"))?;
    Ok(path)
}

/// Opens a save-as dialog.
async fn save_file_as_dialog(content: String) -> Result<PathBuf, String> {
    let file = rfd::AsyncFileDialog::new().set_title("Save As").save_file().await;

    if let Some(file) = file {
        let path = file.path().to_path_buf();
        std::fs::write(&path, content).map_err(|e| format!("Unable to write file: {e}"))?;
        Ok(path)
    } else {
        Err("Save cancelled".to_string())
    }
}
