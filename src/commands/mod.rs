pub type CmdResult<T> = authfix::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod fix;
pub mod rules;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (authfix::Result<serde_json::Value>, i32) {
    crate::tty::status("authfix is working...");

    match command {
        // Commands without global context
        crate::Commands::Rules(args) => dispatch!(args, rules),

        // Commands with global context
        crate::Commands::Fix(args) => dispatch!(args, global, fix),
    }
}
