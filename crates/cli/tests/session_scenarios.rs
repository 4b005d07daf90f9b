//! Black-box tests: scripted input in, rendered output out.

use std::io::Cursor;

use serde_json::Value;

use storekeep_cli::{Config, OutputFormat, Session};

fn run_script(script: &str, output: OutputFormat) -> (String, Session<Cursor<Vec<u8>>, Vec<u8>>) {
    let config = Config {
        output,
        prompt: false,
        ..Config::default()
    };
    let mut session = Session::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), &config);
    session.run().unwrap();
    let text = String::from_utf8(session.output().clone()).unwrap();
    (text, session)
}

#[test]
fn school_kit_walkthrough_in_text_mode() {
    let script = "\
add Pen 1.50
add Notebook 3.00
assign SchoolKit Pen
assign SchoolKit Notebook
show SchoolKit
delete Pen
show SchoolKit
update Notebook 2.75
list
exit
";
    let (out, _) = run_script(script, OutputFormat::Text);

    let expected = "\
Product added successfully.
Product added successfully.
Added Pen to bundle SchoolKit.
Added Notebook to bundle SchoolKit.
Products in bundle SchoolKit:
Product: Pen, Price: $1.50
Product: Notebook, Price: $3.00
Product deleted successfully.
Products in bundle SchoolKit:
Product: Notebook, Price: $3.00
Product updated successfully.
Store Inventory:
Product: Notebook, Price: $2.75
Exiting...
";
    assert_eq!(out, expected);
}

#[test]
fn menu_numbers_work_like_the_original_program() {
    let script = "1\nPen\n1.5\n1\nRuler\n0.75\n4\nKit\nPen\nRuler\n5\nKit\n7\n";
    let (out, _) = run_script(script, OutputFormat::Text);

    assert!(out.contains("Bundle added."));
    assert!(out.contains("Products in bundle Kit:\nProduct: Pen, Price: $1.50\nProduct: Ruler, Price: $0.75\n"));
}

#[test]
fn errors_are_reported_and_the_session_continues() {
    let script = "\
add X 1.0
add X 2.0
update Ghost 1
show Nowhere
add Y abc
frobnicate
list
";
    let (out, _) = run_script(script, OutputFormat::Text);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "Product added successfully.");
    assert_eq!(lines[1], "Error: a product named `X` already exists");
    assert_eq!(lines[2], "Error: product `Ghost` not found");
    assert_eq!(lines[3], "Error: bundle `Nowhere` not found");
    assert_eq!(lines[4], "Error: `abc` is not a valid price");
    assert!(lines[5].starts_with("Error: unknown command `frobnicate`"));
    assert_eq!(&lines[6..], ["Store Inventory:", "Product: X, Price: $1.00"]);
}

#[test]
fn malformed_bytes_are_reported_and_the_session_continues() {
    let config = Config {
        prompt: false,
        ..Config::default()
    };
    let mut script = b"add Pen 1.5\n".to_vec();
    script.extend_from_slice(b"add \xff\xfe 2\n");
    script.extend_from_slice(b"1\nRuler\n\xc3\n");
    script.extend_from_slice(b"list\n");
    let mut session = Session::new(Cursor::new(script), Vec::new(), &config);

    session.run().unwrap();

    let out = String::from_utf8(session.into_output()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "Product added successfully.",
            "Error: input line is not valid UTF-8",
            "Error: input line is not valid UTF-8",
            "Store Inventory:",
            "Product: Pen, Price: $1.50",
        ]
    );
}

#[test]
fn partial_bundle_assignment_keeps_the_valid_half() {
    let script = "add Pen 1.5\nbundle Kit Pen Ghost\nshow Kit\n";
    let (out, session) = run_script(script, OutputFormat::Text);

    assert!(out.contains("Added Pen to bundle Kit.\nCould not add Ghost to bundle Kit: product `Ghost` not found.\n"));
    assert!(!out.contains("Bundle added."));
    assert_eq!(session.catalog().find_bundle("Kit").map(|b| b.len()), Some(1));
}

#[test]
fn empty_bundle_differs_from_unknown_bundle() {
    let script = "add Pen 1\nassign Kit Pen\ndelete Pen\nshow Kit\nshow Other\n";
    let (out, _) = run_script(script, OutputFormat::Text);

    assert!(out.contains("No products found in bundle Kit."));
    assert!(out.contains("Error: bundle `Other` not found"));
}

#[test]
fn json_mode_emits_one_document_per_line() {
    let script = "add Pen 1.5\nadd Pen 2\nlist\nhistory\n";
    let (out, _) = run_script(script, OutputFormat::Json);
    let docs: Vec<Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0]["status"], "ok");
    assert_eq!(docs[1]["status"], "error");
    assert_eq!(docs[1]["kind"], "duplicate_name");
    assert_eq!(docs[2]["products"][0]["name"], "Pen");
    assert_eq!(docs[2]["products"][0]["price_cents"], 150);
    assert_eq!(docs[3]["events"][0]["sequence_number"], 1);
}

#[test]
fn history_lists_applied_changes_only() {
    let script = "add Pen 1\nadd Pen 2\nassign Kit Pen\nassign Kit Pen\nhistory\n";
    let (out, _) = run_script(script, OutputFormat::Text);
    let history: Vec<&str> = out.lines().filter(|l| l.starts_with('#')).collect();

    assert_eq!(history.len(), 3);
    assert!(history[0].contains("catalog.product.added"));
    assert!(history[1].contains("catalog.bundle.created"));
    assert!(history[2].contains("catalog.bundle.product_assigned"));
}
