// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_pipe_tables(tables: usize, rows: usize) -> String {
    let mut content = String::new();
    for t in 0..tables {
        content.push_str(&format!("Table {t} follows.\n\n"));
        content.push_str("| Name | Kind | Count |\n|:-----|:----:|------:|\n");
        for r in 0..rows {
            content.push_str(&format!("| item {r} | *kind* | {} |\n", r * t));
        }
        content.push('\n');
    }
    content
}

#[allow(dead_code)]
pub fn generate_grid_tables(tables: usize, rows: usize) -> String {
    let mut content = String::new();
    for t in 0..tables {
        content.push_str(&format!("Grid {t} follows.\n\n"));
        content.push_str("+----------+----------+\n| Name     | Notes    |\n+==========+==========+\n");
        for r in 0..rows {
            content.push_str(&format!("| row {r:<4} | - one    |\n"));
            content.push_str("|          | - two    |\n");
            // every other row continues into the next
            if r % 2 == 0 {
                content.push_str("+----------+          +\n");
            } else {
                content.push_str("+----------+----------+\n");
            }
        }
        if rows % 2 == 1 {
            content.push_str("| end      |          |\n+----------+----------+\n");
        }
        content.push('\n');
    }
    content
}

#[allow(dead_code)]
pub fn generate_near_miss_tables(tables: usize) -> String {
    let mut content = String::new();
    for t in 0..tables {
        content.push_str(&format!("| a | b |\n|---|---|\n| {t} | 2 | 3 |\n\n"));
        content.push_str("+---+---+\n| a | b |\n+----+--+\n\n");
    }
    content
}
