//! The tool catalog: twelve command-line utilities exposed as functions.
//!
//! Each [`ToolRecipe`] pairs the [`ToolDefinition`] the model sees with the
//! program that implements it and a builder that turns validated
//! [`ToolArguments`] into an [`Invocation`]. Builders are pure; spawning is
//! the executor's job.
//!
//! | Function | Utility | Side effects | Runs unattended |
//! |----------|---------|--------------|-----------------|
//! | `analyze_python_code` | CodeWhisper | no | yes |
//! | `test_api_endpoint` | APITester | no | yes |
//! | `find_duplicate_files` | DuplicateFinder | no | yes |
//! | `manage_code_snippets` | SnippetManager | yes | yes |
//! | `bulk_rename_files` | BulkRename | yes | never |
//! | `manage_env_files` | EnvManager | yes | `parse` only |
//! | `compare_files` | FileDiff | no | yes |
//! | `analyze_git_repository` | GitStats | no | yes |
//! | `optimize_python_imports` | ImportOptimizer | no | yes |
//! | `visualize_directory_tree` | PathSketch | no | yes |
//! | `extract_todos` | TodoExtractor | no | yes |
//! | `convert_data_format` | DataConvert | yes | yes |

use serde_json::{Value, json};
use std::path::PathBuf;
use thiserror::Error;
use toolchat_domain::{DomainError, ParamType, ToolArguments, ToolDefinition, ToolParameter};

pub const ANALYZE_PYTHON_CODE: &str = "analyze_python_code";
pub const TEST_API_ENDPOINT: &str = "test_api_endpoint";
pub const FIND_DUPLICATE_FILES: &str = "find_duplicate_files";
pub const MANAGE_CODE_SNIPPETS: &str = "manage_code_snippets";
pub const BULK_RENAME_FILES: &str = "bulk_rename_files";
pub const MANAGE_ENV_FILES: &str = "manage_env_files";
pub const COMPARE_FILES: &str = "compare_files";
pub const ANALYZE_GIT_REPOSITORY: &str = "analyze_git_repository";
pub const OPTIMIZE_PYTHON_IMPORTS: &str = "optimize_python_imports";
pub const VISUALIZE_DIRECTORY_TREE: &str = "visualize_directory_tree";
pub const EXTRACT_TODOS: &str = "extract_todos";
pub const CONVERT_DATA_FORMAT: &str = "convert_data_format";

/// Flag every utility accepts to suppress ANSI colors
const NO_COLOR: &str = "--no-color";

/// Errors raised while building an invocation from arguments
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("'{argument}' is required when {context}")]
    MissingArgument { argument: String, context: String },

    #[error(transparent)]
    Argument(#[from] DomainError),
}

/// What running a tool call amounts to
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Run the program with these arguments (after the program path)
    Run(Vec<String>),
    /// Do not run anything; hand the intended action back for a human
    Manual { message: String, details: Value },
}

pub type BuildFn = fn(&ToolArguments) -> Result<Invocation, ToolError>;

/// One catalog entry
#[derive(Clone)]
pub struct ToolRecipe {
    pub definition: ToolDefinition,
    /// Program path relative to the tools directory
    pub program: PathBuf,
    /// Never run unattended; any call yields a manual-action result
    pub always_manual: bool,
    build: BuildFn,
}

impl std::fmt::Debug for ToolRecipe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRecipe")
            .field("name", &self.definition.name)
            .field("program", &self.program)
            .field("always_manual", &self.always_manual)
            .finish()
    }
}

impl ToolRecipe {
    pub fn new(definition: ToolDefinition, program: impl Into<PathBuf>, build: BuildFn) -> Self {
        Self {
            definition,
            program: program.into(),
            always_manual: false,
            build,
        }
    }

    pub fn always_manual(mut self) -> Self {
        self.always_manual = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn build(&self, arguments: &ToolArguments) -> Result<Invocation, ToolError> {
        (self.build)(arguments)
    }
}

fn require<'a>(
    arguments: &'a ToolArguments,
    key: &str,
    context: &str,
) -> Result<&'a str, ToolError> {
    arguments
        .get_non_empty_str(key)
        .ok_or_else(|| ToolError::MissingArgument {
            argument: key.to_string(),
            context: context.to_string(),
        })
}

/// `--flag item item ...` when the list is non-empty
fn push_list(argv: &mut Vec<String>, flag: &str, items: Vec<String>) {
    if !items.is_empty() {
        argv.push(flag.to_string());
        argv.extend(items);
    }
}

fn push_option(argv: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value {
        argv.push(flag.to_string());
        argv.push(value.to_string());
    }
}

fn string_param(name: &str, description: &str, required: bool) -> ToolParameter {
    ToolParameter::new(name, description, required)
}

fn bool_param(name: &str, description: &str, default: bool) -> ToolParameter {
    ToolParameter::new(name, description, false)
        .with_type(ParamType::Boolean)
        .with_default(default)
}

fn list_param(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, description, false).with_type(ParamType::StringArray)
}

fn int_param(name: &str, description: &str, default: i64) -> ToolParameter {
    ToolParameter::new(name, description, false)
        .with_type(ParamType::Integer)
        .with_default(default)
}

fn no_color_param() -> ToolParameter {
    bool_param("no_color", "Disable colored output", true)
}

// ==================== Recipes ====================

fn analyze_python_code() -> ToolRecipe {
    let definition = ToolDefinition::new(
        ANALYZE_PYTHON_CODE,
        "CodeWhisper",
        "Analyze Python code files or directories. Provides comprehensive analysis including \
         functions, classes, imports, complexity metrics, and code structure.",
    )
    .with_parameter(string_param("path", "File or directory path to analyze", true))
    .with_parameter(bool_param(
        "detailed",
        "Show detailed information including docstrings and parameters",
        false,
    ))
    .with_parameter(
        string_param("format", "Output format", false)
            .with_enum(["terminal", "json", "markdown"])
            .with_default("terminal"),
    );

    ToolRecipe::new(definition, "tools/CodeWhisper/code_whisper.py", |args| {
        let mut argv = vec![args.get_str("path").unwrap_or(".").to_string()];
        if args.get_bool("detailed").unwrap_or(false) {
            argv.push("--detailed".into());
        }
        push_option(&mut argv, "--format", args.get_non_empty_str("format"));
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn test_api_endpoint() -> ToolRecipe {
    let definition = ToolDefinition::new(
        TEST_API_ENDPOINT,
        "APITester",
        "Test HTTP API endpoints with various methods (GET, POST, PUT, DELETE, etc.). Returns \
         response status, headers, and body.",
    )
    .with_parameter(string_param("url", "API endpoint URL", true))
    .with_parameter(
        string_param("method", "HTTP method", false)
            .with_enum(["GET", "POST", "PUT", "DELETE", "PATCH"])
            .with_default("GET"),
    )
    .with_parameter(
        ToolParameter::new("headers", "HTTP headers as key-value pairs", false)
            .with_type(ParamType::StringMap),
    )
    .with_parameter(string_param("data", "Request body (JSON string)", false));

    ToolRecipe::new(definition, "tools/APITester/api_tester.py", |args| {
        let mut argv = vec![
            args.get_str("method").unwrap_or("GET").to_string(),
            args.require_str("url")?.to_string(),
        ];
        for (key, value) in args.get_string_map("headers") {
            argv.push("-H".into());
            argv.push(format!("{}: {}", key, value));
        }
        push_option(&mut argv, "-d", args.get_non_empty_str("data"));
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn find_duplicate_files() -> ToolRecipe {
    let definition = ToolDefinition::new(
        FIND_DUPLICATE_FILES,
        "DuplicateFinder",
        "Find duplicate files by hash or filename. Can filter by size and extensions.",
    )
    .with_parameter(string_param("path", "Directory path to scan", true))
    .with_parameter(bool_param(
        "by_hash",
        "Find duplicates by file hash (true) or name (false)",
        true,
    ))
    .with_parameter(bool_param("recursive", "Scan directories recursively", true))
    .with_parameter(list_param(
        "extensions",
        "Filter by file extensions (e.g., ['.py', '.txt'])",
    ));

    ToolRecipe::new(definition, "tools/DuplicateFinder/duplicate_finder.py", |args| {
        let mut argv = vec![args.require_str("path")?.to_string()];
        if args.get_bool("recursive").unwrap_or(false) {
            argv.push("--recursive".into());
        }
        if !args.get_bool("by_hash").unwrap_or(true) {
            argv.push("--by-name".into());
        }
        push_list(&mut argv, "--extensions", args.get_str_list("extensions"));
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn manage_code_snippets() -> ToolRecipe {
    let definition = ToolDefinition::new(
        MANAGE_CODE_SNIPPETS,
        "SnippetManager",
        "Store, search, and retrieve code snippets. Supports tags and multiple programming \
         languages.",
    )
    .with_parameter(
        string_param("action", "Action to perform", true)
            .with_enum(["add", "search", "list", "show", "delete"]),
    )
    .with_parameter(string_param("title", "Snippet title (for add/show)", false))
    .with_parameter(string_param("code", "Code content (for add)", false))
    .with_parameter(string_param(
        "language",
        "Programming language (for add/search)",
        false,
    ))
    .with_parameter(list_param("tags", "Tags for categorization"))
    .with_parameter(string_param("query", "Search query", false))
    .with_side_effects();

    ToolRecipe::new(definition, "tools/SnippetManager/snippet_manager.py", |args| {
        let action = args.require_str("action")?;
        let mut argv = vec![action.to_string()];
        match action {
            "add" => {
                let context = "adding a snippet";
                argv.extend(["-t".into(), require(args, "title", context)?.to_string()]);
                argv.extend(["-l".into(), require(args, "language", context)?.to_string()]);
                argv.extend(["-c".into(), require(args, "code", context)?.to_string()]);
                push_list(&mut argv, "--tags", args.get_str_list("tags"));
            }
            "show" | "delete" => {
                argv.push(require(args, "title", "showing or deleting a snippet")?.to_string());
            }
            "search" => {
                if let Some(query) = args.get_non_empty_str("query") {
                    argv.push(query.to_string());
                }
                push_option(&mut argv, "-l", args.get_non_empty_str("language"));
                push_list(&mut argv, "--tags", args.get_str_list("tags"));
            }
            _ => {}
        }
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn bulk_rename_files() -> ToolRecipe {
    let definition = ToolDefinition::new(
        BULK_RENAME_FILES,
        "BulkRename",
        "Batch rename files using patterns, regex, or sequential numbering.",
    )
    .with_parameter(string_param(
        "path",
        "Directory path containing files to rename",
        true,
    ))
    .with_parameter(string_param("pattern", "Search pattern or regex", true))
    .with_parameter(string_param("replacement", "Replacement pattern", true))
    .with_parameter(
        string_param("mode", "Rename mode", false)
            .with_enum(["replace", "regex", "sequential", "case", "prefix", "suffix"])
            .with_default("replace"),
    )
    .with_parameter(bool_param(
        "dry_run",
        "Preview changes without executing",
        true,
    ))
    .with_side_effects();

    ToolRecipe::new(definition, "tools/BulkRename/bulk_rename.py", |args| {
        Ok(Invocation::Manual {
            message: "BulkRename requires interactive confirmation. Please use the CLI directly."
                .to_string(),
            details: json!({
                "path": args.get("path"),
                "pattern": args.get("pattern"),
                "replacement": args.get("replacement"),
                "mode": args.get("mode"),
                "dry_run": args.get_bool("dry_run").unwrap_or(true),
            }),
        })
    })
    .always_manual()
}

fn manage_env_files() -> ToolRecipe {
    let definition = ToolDefinition::new(
        MANAGE_ENV_FILES,
        "EnvManager",
        "Manage .env configuration files. Parse, validate, and switch between environments.",
    )
    .with_parameter(
        string_param("action", "Action to perform", true)
            .with_enum(["parse", "validate", "compare", "set"]),
    )
    .with_parameter(string_param("file_path", "Path to .env file", false).with_default(".env"))
    .with_parameter(string_param(
        "compare_with",
        "Path to second .env file for comparison",
        false,
    ))
    .with_side_effects();

    ToolRecipe::new(definition, "tools/EnvManager/env_manager.py", |args| {
        let action = args.require_str("action")?;
        if action == "parse" {
            let file = args.get_non_empty_str("file_path").unwrap_or(".env");
            return Ok(Invocation::Run(vec![file.to_string(), NO_COLOR.into()]));
        }
        Ok(Invocation::Manual {
            message: format!("EnvManager action '{}' - execute manually", action),
            details: json!({
                "action": action,
                "file_path": args.get("file_path"),
                "compare_with": args.get("compare_with"),
            }),
        })
    })
}

fn compare_files() -> ToolRecipe {
    let definition = ToolDefinition::new(
        COMPARE_FILES,
        "FileDiff",
        "Compare two files or directories and show differences.",
    )
    .with_parameter(string_param("file1", "First file or directory path", true))
    .with_parameter(string_param("file2", "Second file or directory path", true))
    .with_parameter(
        string_param("format", "Diff output format", false)
            .with_enum(["unified", "context", "side-by-side"])
            .with_default("unified"),
    );

    ToolRecipe::new(definition, "tools/FileDiff/file_diff.py", |args| {
        let mut argv = vec![
            args.require_str("file1")?.to_string(),
            args.require_str("file2")?.to_string(),
        ];
        // FileDiff names its format switch --mode
        push_option(&mut argv, "--mode", args.get_non_empty_str("format"));
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn analyze_git_repository() -> ToolRecipe {
    let definition = ToolDefinition::new(
        ANALYZE_GIT_REPOSITORY,
        "GitStats",
        "Analyze git repository statistics including commits, contributors, file changes, and \
         activity over time.",
    )
    .with_parameter(string_param("repo_path", "Path to git repository", true).with_default("."))
    .with_parameter(
        string_param(
            "report_type",
            "Type of report to generate: summary (basic stats), full (all sections), \
             contributors (top contributors), files (most changed files), activity (commit \
             heatmap), recent (recent activity)",
            false,
        )
        .with_enum(["summary", "full", "contributors", "files", "activity", "recent"])
        .with_default("summary"),
    )
    .with_parameter(int_param(
        "top_n",
        "For contributors/files reports: show top N items (default: 10)",
        10,
    ))
    .with_parameter(int_param(
        "recent_days",
        "For recent report: number of days to look back (default: 30)",
        30,
    ))
    .with_parameter(no_color_param());

    ToolRecipe::new(definition, "tools/GitStats/git_stats.py", |args| {
        let mut argv = vec![args.get_str("repo_path").unwrap_or(".").to_string()];
        let top_n = args.get_i64("top_n").unwrap_or(10).to_string();
        let recent_days = args.get_i64("recent_days").unwrap_or(30).to_string();
        match args.get_str("report_type").unwrap_or("summary") {
            "full" => argv.push("--full".into()),
            "contributors" => argv.extend(["--contributors".into(), top_n]),
            "files" => argv.extend(["--files".into(), top_n]),
            "activity" => argv.push("--activity".into()),
            "recent" => argv.extend(["--recent".into(), recent_days]),
            _ => {}
        }
        if args.get_bool("no_color").unwrap_or(true) {
            argv.push(NO_COLOR.into());
        }
        Ok(Invocation::Run(argv))
    })
}

fn optimize_python_imports() -> ToolRecipe {
    let definition = ToolDefinition::new(
        OPTIMIZE_PYTHON_IMPORTS,
        "ImportOptimizer",
        "Analyze and organize Python import statements. Can find unused imports in \
         files/directories or show properly organized imports for a file.",
    )
    .with_parameter(
        string_param(
            "command",
            "Command to execute: 'unused' finds unused imports, 'organize' shows properly \
             organized imports",
            false,
        )
        .with_enum(["unused", "organize"]),
    )
    .with_parameter(string_param(
        "path",
        "For 'unused': file or directory path to analyze. For 'organize': Python file path",
        true,
    ))
    .with_parameter(bool_param(
        "recursive",
        "For 'unused' command: recursively scan directories",
        false,
    ))
    .with_parameter(no_color_param());

    ToolRecipe::new(definition, "tools/ImportOptimizer/import_optimizer.py", |args| {
        let command = args.get_str("command").unwrap_or("unused");
        let mut argv = vec![command.to_string(), args.require_str("path")?.to_string()];
        if command == "unused" && args.get_bool("recursive").unwrap_or(false) {
            argv.push("--recursive".into());
        }
        if args.get_bool("no_color").unwrap_or(true) {
            argv.push(NO_COLOR.into());
        }
        Ok(Invocation::Run(argv))
    })
}

fn visualize_directory_tree() -> ToolRecipe {
    let definition = ToolDefinition::new(
        VISUALIZE_DIRECTORY_TREE,
        "PathSketch",
        "Visualize directory structure as a tree. Shows files and folders in a hierarchical \
         tree format with optional file sizes, permissions, and filtering.",
    )
    .with_parameter(
        string_param(
            "path",
            "Directory path to visualize (default: current directory)",
            false,
        )
        .with_default("."),
    )
    .with_parameter(bool_param("show_all", "Show hidden files and directories", false))
    .with_parameter(bool_param("show_size", "Show file sizes", false))
    .with_parameter(int_param(
        "max_depth",
        "Maximum depth to traverse (e.g., 2 for two levels)",
        -1,
    ))
    .with_parameter(string_param(
        "pattern",
        "Filter files by regex pattern (e.g., '.*\\.py$' for Python files)",
        false,
    ))
    .with_parameter(
        string_param(
            "sort_by",
            "Sort entries by name, size, or modification time",
            false,
        )
        .with_enum(["name", "size", "modified"])
        .with_default("name"),
    )
    .with_parameter(no_color_param());

    ToolRecipe::new(definition, "tools/PathSketch/path_sketch.py", |args| {
        let mut argv = vec![args.get_str("path").unwrap_or(".").to_string()];
        if args.get_bool("show_all").unwrap_or(false) {
            argv.push("--all".into());
        }
        if args.get_bool("show_size").unwrap_or(false) {
            argv.push("--size".into());
        }
        if let Some(depth) = args.get_i64("max_depth").filter(|d| *d > 0) {
            argv.extend(["--max-depth".into(), depth.to_string()]);
        }
        push_option(&mut argv, "--pattern", args.get_non_empty_str("pattern"));
        push_option(&mut argv, "--sort", args.get_non_empty_str("sort_by"));
        if args.get_bool("no_color").unwrap_or(true) {
            argv.push(NO_COLOR.into());
        }
        Ok(Invocation::Run(argv))
    })
}

fn extract_todos() -> ToolRecipe {
    let definition = ToolDefinition::new(
        EXTRACT_TODOS,
        "TodoExtractor",
        "Extract TODO, FIXME, HACK, and other comments from code files.",
    )
    .with_parameter(string_param("path", "File or directory path to scan", true))
    .with_parameter(bool_param("recursive", "Scan directories recursively", true))
    .with_parameter(
        list_param("extensions", "File extensions to scan")
            .with_default(json!([".py", ".js", ".ts", ".java", ".cpp"])),
    )
    .with_parameter(
        list_param("keywords", "Keywords to search for")
            .with_default(json!(["TODO", "FIXME", "HACK", "NOTE"])),
    );

    ToolRecipe::new(definition, "tools/TodoExtractor/todo_extractor.py", |args| {
        let mut argv = vec![args.require_str("path")?.to_string()];
        if !args.get_bool("recursive").unwrap_or(true) {
            argv.push("--no-recursive".into());
        }
        push_list(&mut argv, "--extensions", args.get_str_list("extensions"));
        // TodoExtractor calls its keyword filter --tags
        push_list(&mut argv, "--tags", args.get_str_list("keywords"));
        argv.push(NO_COLOR.into());
        Ok(Invocation::Run(argv))
    })
}

fn convert_data_format() -> ToolRecipe {
    let formats = ["json", "yaml", "csv", "xml"];
    let definition = ToolDefinition::new(
        CONVERT_DATA_FORMAT,
        "DataConvert",
        "Convert data between formats (JSON, YAML, CSV, XML, etc.).",
    )
    .with_parameter(string_param("input_file", "Input file path", true))
    .with_parameter(string_param("output_file", "Output file path", true))
    .with_parameter(string_param("from_format", "Source format", true).with_enum(formats))
    .with_parameter(string_param("to_format", "Target format", true).with_enum(formats))
    .with_side_effects();

    ToolRecipe::new(definition, "tools/DataConvert/data_convert.py", |args| {
        Ok(Invocation::Run(vec![
            args.require_str("input_file")?.to_string(),
            args.require_str("output_file")?.to_string(),
            "--input-format".into(),
            args.require_str("from_format")?.to_string(),
            "--output-format".into(),
            args.require_str("to_format")?.to_string(),
        ]))
    })
}

/// All twelve recipes, in catalog order.
pub fn default_catalog() -> Vec<ToolRecipe> {
    vec![
        analyze_python_code(),
        test_api_endpoint(),
        find_duplicate_files(),
        manage_code_snippets(),
        bulk_rename_files(),
        manage_env_files(),
        compare_files(),
        analyze_git_repository(),
        optimize_python_imports(),
        visualize_directory_tree(),
        extract_todos(),
        convert_data_format(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use toolchat_domain::{DefaultToolValidator, ToolValidator};

    fn recipe(name: &str) -> ToolRecipe {
        default_catalog()
            .into_iter()
            .find(|r| r.name() == name)
            .unwrap()
    }

    fn args(value: Value) -> ToolArguments {
        serde_json::from_value(value).unwrap()
    }

    fn argv(name: &str, value: Value) -> Vec<String> {
        match recipe(name).build(&args(value)).unwrap() {
            Invocation::Run(argv) => argv,
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_has_twelve_unique_tools() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 12);
        let names: HashSet<&str> = catalog.iter().map(|r| r.name()).collect();
        let utilities: HashSet<&str> = catalog
            .iter()
            .map(|r| r.definition.utility.as_str())
            .collect();
        assert_eq!(names.len(), 12);
        assert_eq!(utilities.len(), 12);
    }

    #[test]
    fn test_side_effect_flags() {
        let flagged: Vec<String> = default_catalog()
            .into_iter()
            .filter(|r| r.definition.has_side_effects)
            .map(|r| r.definition.name)
            .collect();
        assert_eq!(
            flagged,
            vec![
                MANAGE_CODE_SNIPPETS,
                BULK_RENAME_FILES,
                MANAGE_ENV_FILES,
                CONVERT_DATA_FORMAT
            ]
        );
    }

    #[test]
    fn test_analyze_python_code_argv() {
        assert_eq!(
            argv(ANALYZE_PYTHON_CODE, json!({"path": "src", "detailed": true, "format": "json"})),
            vec!["src", "--detailed", "--format", "json", "--no-color"]
        );
    }

    #[test]
    fn test_api_endpoint_argv_with_headers() {
        assert_eq!(
            argv(
                TEST_API_ENDPOINT,
                json!({
                    "url": "https://example.com/api",
                    "headers": {"Accept": "application/json"},
                    "data": "{}"
                })
            ),
            vec![
                "GET",
                "https://example.com/api",
                "-H",
                "Accept: application/json",
                "-d",
                "{}",
                "--no-color"
            ]
        );
    }

    #[test]
    fn test_find_duplicates_by_name() {
        assert_eq!(
            argv(
                FIND_DUPLICATE_FILES,
                json!({"path": ".", "by_hash": false, "extensions": [".py"]})
            ),
            vec![".", "--by-name", "--extensions", ".py", "--no-color"]
        );
    }

    #[test]
    fn test_snippet_add_requires_fields() {
        let err = recipe(MANAGE_CODE_SNIPPETS)
            .build(&args(json!({"action": "add", "title": "t"})))
            .unwrap_err();
        assert_eq!(err.to_string(), "'language' is required when adding a snippet");

        assert_eq!(
            argv(
                MANAGE_CODE_SNIPPETS,
                json!({"action": "add", "title": "t", "language": "py", "code": "x=1", "tags": ["a"]})
            ),
            vec!["add", "-t", "t", "-l", "py", "-c", "x=1", "--tags", "a", "--no-color"]
        );
    }

    #[test]
    fn test_bulk_rename_is_manual() {
        let recipe = recipe(BULK_RENAME_FILES);
        assert!(recipe.always_manual);
        match recipe.build(&args(json!({"path": "."}))).unwrap() {
            Invocation::Manual { message, details } => {
                assert!(message.contains("interactive confirmation"));
                assert_eq!(details["dry_run"], true);
            }
            other => panic!("expected Manual, got {:?}", other),
        }
    }

    #[test]
    fn test_env_manager_only_parses_unattended() {
        assert_eq!(
            argv(MANAGE_ENV_FILES, json!({"action": "parse"})),
            vec![".env", "--no-color"]
        );
        let invocation = recipe(MANAGE_ENV_FILES)
            .build(&args(json!({"action": "set", "file_path": "prod.env"})))
            .unwrap();
        assert!(matches!(
            invocation,
            Invocation::Manual { ref message, .. } if message == "EnvManager action 'set' - execute manually"
        ));
    }

    #[test]
    fn test_git_report_types() {
        assert_eq!(
            argv(ANALYZE_GIT_REPOSITORY, json!({"repo_path": "."})),
            vec![".", "--no-color"]
        );
        assert_eq!(
            argv(
                ANALYZE_GIT_REPOSITORY,
                json!({"repo_path": ".", "report_type": "contributors", "top_n": 5, "no_color": false})
            ),
            vec![".", "--contributors", "5"]
        );
        assert_eq!(
            argv(ANALYZE_GIT_REPOSITORY, json!({"repo_path": "r", "report_type": "recent"})),
            vec!["r", "--recent", "30", "--no-color"]
        );
    }

    #[test]
    fn test_directory_tree_ignores_non_positive_depth() {
        assert_eq!(
            argv(VISUALIZE_DIRECTORY_TREE, json!({"max_depth": -1, "show_size": true})),
            vec![".", "--size", "--no-color"]
        );
        assert_eq!(
            argv(VISUALIZE_DIRECTORY_TREE, json!({"max_depth": 2, "sort_by": "size"})),
            vec![".", "--max-depth", "2", "--sort", "size", "--no-color"]
        );
    }

    #[test]
    fn test_extract_todos_maps_keywords_to_tags() {
        assert_eq!(
            argv(
                EXTRACT_TODOS,
                json!({"path": "src", "recursive": false, "keywords": ["FIXME"]})
            ),
            vec!["src", "--no-recursive", "--tags", "FIXME", "--no-color"]
        );
    }

    #[test]
    fn test_convert_data_format_argv() {
        assert_eq!(
            argv(
                CONVERT_DATA_FORMAT,
                json!({"input_file": "a.json", "output_file": "a.yaml", "from_format": "json", "to_format": "yaml"})
            ),
            vec!["a.json", "a.yaml", "--input-format", "json", "--output-format", "yaml"]
        );
    }

    #[test]
    fn test_definitions_validate_their_own_examples() {
        let validator = DefaultToolValidator;
        let recipe = recipe(COMPARE_FILES);
        assert!(
            validator
                .validate(&args(json!({"file1": "a", "file2": "b"})), &recipe.definition)
                .is_ok()
        );
        assert!(
            validator
                .validate(
                    &args(json!({"file1": "a", "file2": "b", "format": "html"})),
                    &recipe.definition
                )
                .is_err()
        );
    }
}
