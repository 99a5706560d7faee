// Unit tests for the append-only transcript

use crate::transcript::Transcript;

use common::ChatTurn;

/// **VALUE**: Verifies appended turns render in order as scrollback text.
///
/// **WHY THIS MATTERS**: The rendered string is exactly what the read-only
/// display shows. Ordering and line format are the visible contract.
///
/// **BUG THIS CATCHES**: Would catch reordered turns or a changed line
/// layout between turns.
#[test]
fn given_two_turns_when_rendered_then_lines_appear_in_order() {
    // GIVEN: A transcript with two completed exchanges
    let mut transcript = Transcript::new();
    transcript.append(ChatTurn::new(String::from("hello"), String::from("hi there")));
    transcript.append(ChatTurn::new(String::from("bye"), String::from("goodbye")));

    // WHEN: Rendering
    let text = transcript.render_text();

    // THEN: All four lines, in order
    assert_eq!(
        text,
        "You: hello\nAssistant: hi there\nYou: bye\nAssistant: goodbye\n"
    );
    assert_eq!(transcript.len(), 2);
}

/// **VALUE**: Verifies an empty transcript renders to an empty string.
#[test]
fn given_empty_transcript_when_rendered_then_empty_string() {
    let transcript = Transcript::new();

    assert!(transcript.is_empty());
    assert_eq!(transcript.render_text(), "");
}

/// **VALUE**: Verifies `turns()` exposes the appended data unchanged.
///
/// **BUG THIS CATCHES**: Would catch the transcript mutating or de-duplicating
/// turns on append; the record must be literal.
#[test]
fn given_appends_when_turns_read_then_data_is_unchanged() {
    let mut transcript = Transcript::new();
    let turn = ChatTurn::new(String::from("hello"), String::from("hi there"));
    transcript.append(turn.clone());
    transcript.append(turn.clone());

    assert_eq!(transcript.turns(), &[turn.clone(), turn]);
}
