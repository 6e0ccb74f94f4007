//! Command-encoder behavior: capacity checks, register-mirror consistency,
//! and cursor clamping, observed through the strobed bytes.

mod common;

use charlcd_async::Error;
use common::{bytes_4bit, drain, lcd_4bit, strobes};

#[test]
fn begin_fails_on_an_undersized_queue() {
    let (mut lcd, _log, _clock) = lcd_4bit::<4>();
    assert_eq!(lcd.begin(16, 2), Err(Error::QueueFull));
}

#[test]
fn write_reports_backpressure_instead_of_dropping() {
    let (mut lcd, _log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    // each data byte costs two queue bytes
    for _ in 0..32 {
        assert_eq!(lcd.write(b'.'), 1);
    }
    assert_eq!(lcd.write(b'.'), 0);
    assert_eq!(lcd.clear(), Err(Error::QueueFull));

    // the rejected bytes were never partially enqueued
    let delays = drain(&mut lcd, &clock);
    assert_eq!(delays.len(), 32);
}

#[test]
fn failed_toggle_leaves_the_register_mirror_unchanged() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    while lcd.write(b' ') == 1 {}
    assert_eq!(lcd.cursor_on(), Err(Error::QueueFull));
    drain(&mut lcd, &clock);

    // the cursor bit must not leak into the next successful toggle
    lcd.blink_on().expect("queue drained");
    drain(&mut lcd, &clock);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    assert_eq!(bytes.last(), Some(&(false, 0x0D))); // display + blink only
}

#[test]
fn set_cursor_combines_row_offset_and_column() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    lcd.set_cursor(3, 1).expect("room for one command");
    drain(&mut lcd, &clock);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    assert_eq!(bytes.last(), Some(&(false, 0x80 | (0x40 + 3))));
}

#[test]
fn set_cursor_clamps_to_the_configured_row_count() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    lcd.set_cursor(5, 2).expect("room for one command");
    drain(&mut lcd, &clock);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    // row 2 clamps to row 1 on a two-row panel
    assert_eq!(bytes.last(), Some(&(false, 0x80 | (0x40 + 5))));
}

#[test]
fn set_cursor_clamps_to_the_fourth_row_at_most() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(20, 4).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    lcd.set_cursor(0, 9).expect("room for one command");
    drain(&mut lcd, &clock);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    // row offsets for a 20-column panel: 0x00, 0x40, 0x14, 0x54
    assert_eq!(bytes.last(), Some(&(false, 0x80 | 0x54)));
}

#[test]
fn row_offsets_can_be_overridden() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 4).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    lcd.set_row_offsets([0x00, 0x40, 0x14, 0x54]);
    lcd.set_cursor(1, 2).expect("room for one command");
    drain(&mut lcd, &clock);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    assert_eq!(bytes.last(), Some(&(false, 0x80 | (0x14 + 1))));
}

#[test]
fn toggles_strobe_the_expected_control_bytes() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);
    let before = bytes_4bit(&strobes(&log)[4..]).len();

    lcd.cursor_on().expect("queue has room");
    lcd.blink_on().expect("queue has room");
    lcd.display_off().expect("queue has room");
    lcd.display_on().expect("queue has room");
    lcd.scroll_left().expect("queue has room");
    lcd.scroll_right().expect("queue has room");
    lcd.right_to_left().expect("queue has room");
    lcd.left_to_right().expect("queue has room");
    lcd.autoscroll_on().expect("queue has room");
    lcd.autoscroll_off().expect("queue has room");
    drain(&mut lcd, &clock);

    let bytes = bytes_4bit(&strobes(&log)[4..]);
    assert_eq!(
        bytes[before..],
        [
            (false, 0x0E), // display + cursor
            (false, 0x0F), // display + cursor + blink
            (false, 0x0B), // display off, cursor + blink kept
            (false, 0x0F),
            (false, 0x18), // shift display left
            (false, 0x1C), // shift display right
            (false, 0x04), // entry mode: right-to-left
            (false, 0x06), // entry mode: left-to-right
            (false, 0x07), // entry mode: autoscroll
            (false, 0x06),
        ]
    );
}

#[test]
fn home_is_a_long_settle_command() {
    let (mut lcd, log, clock) = lcd_4bit::<64>();
    lcd.begin(16, 2).expect("reset sequence fits");
    drain(&mut lcd, &clock);

    lcd.home().expect("room for one command");
    let delays = drain(&mut lcd, &clock);
    assert_eq!(delays, [1_711]);
    let bytes = bytes_4bit(&strobes(&log)[4..]);
    assert_eq!(bytes.last(), Some(&(false, 0x02)));
}

#[test]
fn write_str_counts_accepted_bytes() {
    let (mut lcd, _log, clock) = lcd_4bit::<16>();
    // no begin: the queue is empty and entirely available
    assert_eq!(lcd.write_str("hello"), 5);
    assert_eq!(lcd.write_str("world!"), 3);
    assert_eq!(lcd.write_str("x"), 0);
    let delays = drain(&mut lcd, &clock);
    assert_eq!(delays.len(), 8);
}
