#![allow(dead_code)]

pub const MINIMAL_CONFIG: &str = r#"breaks: false
heading_ids: true
words_per_minute: 200
"#;

pub const MINIMAL_POST: &str = r#"---
title: "Test Post"
tags: [test, example]
---

This is a test post content.

## Heading

Some more content here.

## Heading
"#;

pub const LAYOUT_POST: &str = r#"<div class="layout-row">
<div class="layout-column">
**Left** column
</div>
<div class="layout-column">
## Right
</div>
</div>
"#;

pub const PLAIN_MARKDOWN: &str = "# Plain\n\nNo front matter here.\n";

pub const POST_MALFORMED_YAML: &str = r#"---
title: [unclosed
---

Body.
"#;
