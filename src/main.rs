// Main entry point for the minisql shell
// An interactive front end over SqlCompiler: read a statement, print the result

use anyhow::Result;
use clap::Parser as ClapParser;
use minisql::query::lexer;
use minisql::{CompileResult, SqlCompiler};
use std::io::{self, Write};

/// minisql - compile and run SQL statements against an in-memory database
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Execute a single SQL statement and exit
    #[arg(short, long)]
    execute: Option<String>,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut compiler = SqlCompiler::new();

    // If a statement was provided, execute it and exit
    if let Some(sql) = args.execute {
        let result = compiler.compile_and_execute(&sql);
        return print_result(&result, args.json);
    }

    println!("╔════════════════════════════════════════════╗");
    println!("║          minisql Interactive Shell         ║");
    println!("║    A Small SQL Compiler, In Memory Only    ║");
    println!("╚════════════════════════════════════════════╝");
    println!();
    println!("Type SQL statements or '.help' for help");
    println!("Type '.exit' to quit");
    println!();

    repl(|input| execute_input(&mut compiler, input, args.json))
}

/// REPL (Read-Eval-Print Loop)
/// `execute_fn` gets every line that isn't `.help` or `.exit`
fn repl<F>(mut execute_fn: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("minisql> ");
        stdout.flush()?;

        let mut input = String::new();
        if stdin.read_line(&mut input)? == 0 {
            // EOF (Ctrl-D)
            println!();
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ".exit" | ".quit" => {
                println!("Goodbye!");
                break;
            }
            ".help" => {
                print_help();
                continue;
            }
            _ => {}
        }

        if let Err(e) = execute_fn(input) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

/// Handle one line: a dot command or a SQL statement
fn execute_input(compiler: &mut SqlCompiler, input: &str, json: bool) -> Result<()> {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };

    match command {
        ".tables" => {
            let tables = compiler.database().list_tables();
            if tables.is_empty() {
                println!("No tables");
            }
            for name in tables {
                println!("{}", name);
            }
        }
        ".schema" => {
            let info = compiler.database().table_info(rest)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Table '{}' ({} row(s))", info.name, info.row_count);
                for column in &info.columns {
                    println!("  {} {}", column.name, column.data_type);
                }
            }
        }
        ".tokens" => {
            for token in lexer::tokenize(rest)? {
                println!("{:>4}  {}", token.offset, token.kind);
            }
        }
        ".ast" => {
            let statement = SqlCompiler::compile(rest)?;
            println!("{:#?}", statement);
        }
        _ if command.starts_with('.') => {
            println!("Unknown command: {}", command);
            println!("Type '.help' for help");
        }
        _ => {
            let result = compiler.compile_and_execute(input);
            print_result(&result, json)?;
        }
    }

    Ok(())
}

fn print_result(result: &CompileResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if result.success {
        println!("{}", result.format());
    } else {
        eprintln!("{}", result.format());
    }
    Ok(())
}

/// Print help information
fn print_help() {
    println!("Special Commands:");
    println!("  .help              Show this help message");
    println!("  .exit, .quit       Exit the shell");
    println!("  .tables            List all tables");
    println!("  .schema <table>    Show a table's columns and row count");
    println!("  .tokens <sql>      Show the tokens of a statement");
    println!("  .ast <sql>         Show the parsed statement");
    println!();
    println!("Supported SQL Statements:");
    println!("  CREATE TABLE students (id INT, name VARCHAR(50), gpa FLOAT, born DATE)");
    println!("  INSERT INTO students VALUES (1, 'Alice', 3.9, '2004-05-01')");
    println!("  INSERT INTO students (id, name) VALUES (2, 'Bob')");
    println!("  SELECT * FROM students WHERE gpa >= 3.5 AND name != 'Bob'");
    println!("  SELECT name, gpa FROM students");
    println!("  UPDATE students SET gpa = 3.7 WHERE id = 2");
    println!("  DELETE FROM students WHERE id = 1");
    println!("  DROP TABLE students");
    println!();
    println!("Notes:");
    println!("  - Keywords are case-insensitive, table and column names are not");
    println!("  - Strings use single or double quotes; \\ escapes the next character");
    println!("  - AND / OR have no precedence and parentheses are not supported");
    println!("  - One statement per line; '--' starts a comment");
    println!();
}
