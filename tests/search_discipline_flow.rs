mod util;

use serde_json::json;
use util::App;

#[test]
fn grade_is_found_by_name_or_registration() {
    let mut app = App::spawn();
    let registration = util::register_student(&mut app, "MAT", "Ana", "CS", &[("Math", 7.0)]);

    app.choose(2);
    app.answer("promptString", json!("Ana"));
    app.answer("promptString", json!("math"));
    let info = app.ack("info");
    assert_eq!(info["title"], "Search discipline");
    assert_eq!(info["message"], "Ana\n\tmath: 7.00");

    // Registration lookup is the fallback and is case-insensitive.
    app.choose(2);
    app.answer("promptString", json!(registration.to_lowercase()));
    app.answer("promptString", json!("Math"));
    let info = app.ack("info");
    assert_eq!(info["message"], "Ana\n\tMath: 7.00");

    app.exit();
}

#[test]
fn unknown_student_and_unknown_discipline_alert() {
    let mut app = App::spawn();
    util::register_student(&mut app, "MAT", "Ana", "CS", &[("Math", 7.0)]);

    app.choose(2);
    app.answer("promptString", json!("Nobody"));
    app.answer("promptString", json!("Math"));
    let alert = app.ack("alert");
    assert_eq!(alert["message"], "Student not found.");

    app.choose(2);
    app.answer("promptString", json!("Ana"));
    app.answer("promptString", json!("History"));
    let alert = app.ack("alert");
    assert_eq!(alert["message"], "Ana is not enrolled in History.");

    app.exit();
}

#[test]
fn blank_lookup_fields_reprompt() {
    let mut app = App::spawn();
    app.choose(2);
    app.answer("promptString", json!(""));
    let retry = app.read_request();
    assert_eq!(retry["error"], "This field cannot be blank");
    app.respond(&retry, json!({ "cancelled": true }));
    app.exit();
}
