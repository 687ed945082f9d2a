use lineset_core::ops::source_ops::open_source;
use lineset_core::{compare, CompareOptions, SourceId, Workspace};

/// Build source text from lines, one terminator after each
#[allow(dead_code)]
pub fn text_of(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{}\n", l)).collect()
}

/// Open two sources holding `a` and `b` in a fresh workspace
#[allow(dead_code)]
pub fn open_pair(a: &[&str], b: &[&str]) -> (Workspace, SourceId, SourceId) {
    let mut ws = Workspace::new();
    let id_a = open_source(&mut ws, "a.txt", &text_of(a));
    let id_b = open_source(&mut ws, "b.txt", &text_of(b));
    (ws, id_a, id_b)
}

/// Open two sources and compare them with default options (views "A" and "B")
#[allow(dead_code)]
pub fn compared_pair(a: &[&str], b: &[&str]) -> (Workspace, SourceId, SourceId) {
    let (mut ws, id_a, id_b) = open_pair(a, b);
    compare(&mut ws, &id_a, &id_b, &CompareOptions::default()).unwrap();
    (ws, id_a, id_b)
}

/// Lines currently shown by a view
#[allow(dead_code)]
pub fn view_lines(ws: &Workspace, name: &str) -> Vec<String> {
    ws.get_view(name).unwrap().lines().to_vec()
}

#[allow(dead_code)]
pub fn strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}
