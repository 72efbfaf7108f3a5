#![allow(dead_code)]

use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// One spawned gradesd sidecar, driven through its dialog protocol: the
/// sidecar sends one request per line on stdout, the test answers on stdin.
pub struct App {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl App {
    pub fn spawn() -> App {
        let exe = env!("CARGO_BIN_EXE_gradesd");
        let mut child = Command::new(exe)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn gradesd");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = child.stdout.take().expect("child stdout");
        App {
            child,
            stdin,
            reader: BufReader::new(stdout),
        }
    }

    pub fn read_request(&mut self) -> Value {
        let mut line = String::new();
        self.reader.read_line(&mut line).expect("read dialog request");
        assert!(!line.trim().is_empty(), "empty dialog request line");
        serde_json::from_str(line.trim()).expect("parse dialog request")
    }

    /// Replies to an already-read request, echoing its id.
    pub fn respond(&mut self, request: &Value, mut body: Value) {
        body["id"] = request["id"].clone();
        writeln!(self.stdin, "{body}").expect("write dialog reply");
        self.stdin.flush().expect("flush dialog reply");
    }

    fn take(&mut self, kind: &str) -> Value {
        let request = self.read_request();
        assert_eq!(request["kind"], kind, "unexpected dialog request: {request}");
        request
    }

    /// Reads the next request, asserts its kind, answers with `value`.
    pub fn answer(&mut self, kind: &str, value: Value) -> Value {
        let request = self.take(kind);
        self.respond(&request, json!({ "value": value }));
        request
    }

    pub fn cancel(&mut self, kind: &str) -> Value {
        let request = self.take(kind);
        self.respond(&request, json!({ "cancelled": true }));
        request
    }

    /// Dismisses a one-way dialog (info/alert/text) and returns it.
    pub fn ack(&mut self, kind: &str) -> Value {
        let request = self.take(kind);
        self.respond(&request, json!({}));
        request
    }

    pub fn choose(&mut self, index: u64) -> Value {
        self.answer("menu", json!(index))
    }

    /// Cancels the menu and waits for a clean exit.
    pub fn exit(mut self) {
        self.cancel("menu");
        let status = self.child.wait().expect("wait gradesd");
        assert!(status.success(), "gradesd exited with {status}");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

/// Drives a full registration through the dialogs and returns the generated
/// registration number from the success message.
pub fn register_student(
    app: &mut App,
    initials: &str,
    name: &str,
    course: &str,
    disciplines: &[(&str, f64)],
) -> String {
    app.choose(0);
    app.answer("promptString", json!(initials));
    app.answer("promptString", json!(name));
    app.answer("promptString", json!(course));

    for (i, (discipline, grade)) in disciplines.iter().enumerate() {
        app.answer("promptString", json!(discipline));
        app.answer("promptNumber", json!(grade));

        // "Enroll in another discipline?" only appears while slots remain.
        let slots_left = 5 - (i + 1);
        if slots_left > 0 {
            let is_last = i + 1 == disciplines.len();
            app.answer("confirm", json!(!is_last));
        }
    }

    let info = app.ack("info");
    let message = info["message"].as_str().expect("info message");
    message
        .rsplit("Registration: ")
        .next()
        .expect("registration in message")
        .trim()
        .to_string()
}
