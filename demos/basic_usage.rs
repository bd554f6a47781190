// Example: Basic compiler usage
// Run with: cargo run --example basic_usage

use minisql::SqlCompiler;

fn main() -> anyhow::Result<()> {
    println!("=== minisql Basic Usage Example ===\n");

    // One compiler = one in-memory database
    let mut compiler = SqlCompiler::new();

    // 1. Create a table
    println!("1. Creating a 'students' table...");
    let result = compiler
        .compile_and_execute("CREATE TABLE students (id INT, name VARCHAR(50), age INT, grade VARCHAR(2))");
    println!("{}\n", result.format());

    // 2. Insert some data
    println!("2. Inserting students...");
    let inserts = vec![
        "INSERT INTO students VALUES (1, 'Alice', 20, 'A')",
        "INSERT INTO students VALUES (2, 'Bob', 21, 'B')",
        "INSERT INTO students VALUES (3, 'Charlie', 19, 'A')",
        "INSERT INTO students (id, name) VALUES (4, 'Diana')",
    ];

    for sql in inserts {
        println!("{}", compiler.compile_and_execute(sql).format());
    }
    println!();

    // 3. Query all students
    println!("3. Selecting all students...");
    println!("{}\n", compiler.compile_and_execute("SELECT * FROM students").format());

    // 4. Query with a WHERE chain
    println!("4. Selecting students older than 19 with grade A...");
    let result = compiler.compile_and_execute("SELECT name, age FROM students WHERE age > 19 AND grade = 'A'");
    println!("{}\n", result.format());

    // 5. Update
    println!("5. Updating Bob's grade...");
    let result = compiler.compile_and_execute("UPDATE students SET grade = 'A+' WHERE name = 'Bob';");
    println!("{}\n", result.format());

    // 6. Delete
    println!("6. Deleting students younger than 20...");
    let result = compiler.compile_and_execute("DELETE FROM students WHERE age < 20");
    println!("{}\n", result.format());

    // 7. Errors come back as results, not panics
    println!("7. Running a few broken statements...");
    for sql in [
        "SELECT * FROM teachers",
        "INSERT INTO students VALUES (5, 'Eve')",
        "SELECT * FROM students WHERE name = 'unterminated",
        "SELECT name FROM",
    ] {
        println!("{}", compiler.compile_and_execute(sql).format());
    }
    println!();

    // 8. Results as JSON (what a front end would consume)
    println!("8. A SELECT as JSON...");
    let result = compiler.compile_and_execute("SELECT * FROM students WHERE grade = 'A+'");
    println!("{}\n", serde_json::to_string_pretty(&result)?);

    // 9. Inspect the schema
    println!("9. Table info...");
    for name in compiler.database().list_tables() {
        let info = compiler.database().table_info(&name)?;
        println!("{}: {} column(s), {} row(s)", info.name, info.columns.len(), info.row_count);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
