//! `/autolink` command descriptor.
//!
//! Pure declarative metadata for the host's command palette. Nothing here
//! executes a command; the tree is rebuilt on every registration.

use serde::Serialize;

/// Trigger word the command is registered under.
pub const TRIGGER: &str = "autolink";

/// Top-level command registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub trigger: String,
    pub display_name: String,
    pub description: String,
    pub auto_complete: bool,
    pub auto_complete_desc: String,
    pub auto_complete_hint: String,
    pub autocomplete_data: AutocompleteData,
}

/// A node in the autocomplete tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteData {
    pub trigger: String,
    pub hint: String,
    pub help_text: String,
    pub arguments: Vec<AutocompleteArg>,
    pub sub_commands: Vec<AutocompleteData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutocompleteArg {
    pub help_text: String,
    pub required: bool,
    pub kind: ArgumentKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArgumentKind {
    /// Free text.
    Text { hint: String, pattern: String },
    /// One value out of a fixed list.
    StaticList { items: Vec<ListItem> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub item: String,
    pub hint: String,
    pub help_text: String,
}

impl ListItem {
    fn new(item: &str, hint: &str, help_text: &str) -> Self {
        Self {
            item: item.to_string(),
            hint: hint.to_string(),
            help_text: help_text.to_string(),
        }
    }
}

impl AutocompleteData {
    pub fn new(trigger: &str, hint: &str, help_text: &str) -> Self {
        Self {
            trigger: trigger.to_string(),
            hint: hint.to_string(),
            help_text: help_text.to_string(),
            arguments: Vec::new(),
            sub_commands: Vec::new(),
        }
    }

    /// Add a required free-text argument.
    pub fn add_text_argument(&mut self, help_text: &str, hint: &str, pattern: &str) {
        self.arguments.push(AutocompleteArg {
            help_text: help_text.to_string(),
            required: true,
            kind: ArgumentKind::Text {
                hint: hint.to_string(),
                pattern: pattern.to_string(),
            },
        });
    }

    pub fn add_static_list_argument(
        &mut self,
        help_text: &str,
        required: bool,
        items: Vec<ListItem>,
    ) {
        self.arguments.push(AutocompleteArg {
            help_text: help_text.to_string(),
            required,
            kind: ArgumentKind::StaticList { items },
        });
    }

    pub fn add_command(&mut self, command: AutocompleteData) {
        self.sub_commands.push(command);
    }

    /// Direct subcommand by trigger.
    pub fn sub_command(&self, trigger: &str) -> Option<&AutocompleteData> {
        self.sub_commands.iter().find(|c| c.trigger == trigger)
    }
}

/// Build the full command registration.
pub fn build_command() -> Command {
    Command {
        trigger: TRIGGER.to_string(),
        display_name: "Autolink".to_string(),
        description: "Autolink administration.".to_string(),
        auto_complete: true,
        auto_complete_desc: "Available commands: add, delete, disable, enable, list, set, test"
            .to_string(),
        auto_complete_hint: "[command]".to_string(),
        autocomplete_data: build_autocomplete_data(),
    }
}

/// Build the autocomplete tree for `/autolink`.
pub fn build_autocomplete_data() -> AutocompleteData {
    let mut autolink = AutocompleteData::new(
        TRIGGER,
        "[command]",
        "Available commands: add, delete, disable, enable, list, set, test",
    );

    for (trigger, help_text, arg_help) in [
        ("add", "Add a new link with a given name", "Name for a new link"),
        ("delete", "Delete a link with a given name", "Name of the link to delete"),
        ("disable", "Disable a link with a given name", "Name of the link to disable"),
        ("enable", "Enable a link with a given name", "Name of the link to enable"),
    ] {
        let mut command = AutocompleteData::new(trigger, "", help_text);
        command.add_text_argument(arg_help, "[name]", "");
        autolink.add_command(command);
    }

    let mut list = AutocompleteData::new("list", "", "List all configured links");
    list.add_static_list_argument(
        "List the link which match with the given condition",
        false,
        vec![
            ListItem::new(
                "[name]",
                "(optional)",
                "If `name` of a link is provided, it will only list a configuration of `name` link",
            ),
            ListItem::new(
                "Template",
                "(optional)",
                "List configuration of link matched with the given template",
            ),
            ListItem::new(
                "Pattern",
                "(optional)",
                "List configuration of link matched with the given pattern",
            ),
        ],
    );
    autolink.add_command(list);

    let mut set = AutocompleteData::new("set", "", "Set a field of a link with a given value");
    set.add_text_argument("Name of a link to set", "[name]", "");
    set.add_static_list_argument(
        "A name of a field to set a value",
        false,
        vec![
            ListItem::new("Template", "", "Set the `Template` field"),
            ListItem::new("Pattern", "", "Set the `Pattern` field"),
            ListItem::new("WordMatch", "", "If true uses the \\b word boundaries"),
            ListItem::new(
                "ProcessBotPosts",
                "",
                "If true applies changes to posts created by bot accounts.",
            ),
            ListItem::new("Scope", "", "team/channel the autolink applies to"),
        ],
    );
    autolink.add_command(set);

    let mut test = AutocompleteData::new("test", "", "Test a link on the text provided");
    test.add_text_argument("Name of a link to test with", "[name]", "");
    test.add_text_argument("Sample text which the link applies", "[sample text]", "");
    autolink.add_command(test);

    autolink.add_command(AutocompleteData::new(
        "help",
        "",
        "Autolink plugin slash command help",
    ));

    autolink
}
