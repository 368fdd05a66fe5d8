use clap::{value_parser, crate_version, Arg, Command, ValueHint};

const CONFIG_LONG_HELP: &str = "JSON settings file, e.g.
{ \"vocabulary\": { \"instructions\": [\"MoveL\",\"MyGripperOpen\"] }, \"highlight\": { \"trailingComments\": false } }
tables that are given replace the built-in ones, the rest keep their defaults";
const FILE_HELP: &str = "if the source is piped, omit `--file` option";

fn file_arg() -> Arg {
    Arg::new("file").short('f').long("file").value_name("PATH").help("path to the source file")
        .long_help(FILE_HELP)
        .value_hint(ValueHint::FilePath)
        .required(false)
}

fn name_arg() -> Arg {
    Arg::new("name").short('n').long("name").value_name("NAME")
        .help("display name of piped source, names the module if there is no header")
        .required(false)
}

fn config_arg() -> Arg {
    Arg::new("config").long("config").value_name("PATH").help("settings file")
        .long_help(CONFIG_LONG_HELP)
        .value_hint(ValueHint::FilePath)
        .required(false)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

fn format_arg(formats: [&'static str;3], default: &'static str) -> Arg {
    Arg::new("format").long("format").value_name("FORMAT").help("output format")
        .value_parser(formats)
        .default_value(default)
}

pub fn build_cli() -> Command {
    let long_help = "rapidkit is always invoked with exactly one of several subcommands.
The subcommands read RAPID source from a file or from stdin and write to stdout.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
outline a module:       `rapidkit outline -f MainModule.mod`
outline for an editor:  `rapidkit outline -f MainModule.mod --format lsp --indent 2`
highlight a routine:    `rapidkit highlight -f MainModule.mod -m MainModule -r main`
highlight from a pipe:  `cat Tool.sys | rapidkit highlight --format json`";

    let mut main_cmd = Command::new("rapidkit")
        .about("Outlines and highlights ABB RAPID robot programs.")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(
        Command::new("outline")
            .arg(file_arg())
            .arg(name_arg())
            .arg(format_arg(["text","json","lsp"],"text"))
            .arg(indent_arg())
            .arg(config_arg())
            .about("write the modules, routines, and declarations of a source file"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("highlight")
            .arg(file_arg())
            .arg(name_arg())
            .arg(Arg::new("module").short('m').long("module").value_name("MODULE")
                .help("only highlight this module").required(false))
            .arg(Arg::new("routine").short('r').long("routine").value_name("ROUTINE")
                .help("only highlight this routine of the module").requires("module").required(false))
            .arg(format_arg(["ansi","json","lsp"],"ansi"))
            .arg(indent_arg())
            .arg(config_arg())
            .about("classify source text for presentation"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(Arg::new("shell").short('s').long("shell").value_name("SHELL").help("shell type")
                .value_parser(["bash","elv","fish","ps1","zsh"])
                .required(true))
            .about("write shell completion script to stdout"),
    );
    main_cmd
}
