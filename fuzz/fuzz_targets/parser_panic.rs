#![no_main]
use libfuzzer_sys::fuzz_target;
use teamcomm_log::RecordParser;

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps inputs that are "almost" text in play.
    let s = String::from_utf8_lossy(data);
    let one_shot = RecordParser::new("fuzz").parse(&s);

    // Splitting at an arbitrary char boundary must not change the result.
    let mid = s.char_indices().nth(s.chars().count() / 2).map_or(0, |(i, _)| i);
    let mut parser = RecordParser::new("fuzz");
    let mut streamed = parser.update(&s[..mid]);
    streamed.extend(parser.update(&s[mid..]));
    streamed.extend(parser.finish());
    assert_eq!(one_shot, streamed);
});
