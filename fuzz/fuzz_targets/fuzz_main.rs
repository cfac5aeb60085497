// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use libfuzzer_sys::fuzz_target;
use xreadme_core::{ContentSource, MarkupConverter, RichContent};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let converter = MarkupConverter::new();
    let _ = converter.convert(input);

    let mut content = RichContent::from_source(ContentSource::Markup(input.to_string()));
    if let Some(name) = input.lines().next() {
        content.append_section(name);
        content.strip_section(name);
    }
    let _ = converter.convert(&content.serialize_to_markup());

    content.replace_content(ContentSource::Json(input.to_string()));
});
