//! Prompt templates for character page generation.
//!
//! A submission is turned into one natural-language instruction that embeds
//! every caller-supplied field verbatim. The instruction is stored with the
//! page and replayed against the model on first view, together with
//! [`SYSTEM_PROMPT`].

/// Design brief sent as the system message on every generation call.
pub const SYSTEM_PROMPT: &str = r#"# System Instruction for Character-Based Web Design

Create HTML webpages that align with provided character information and specified titles.

## Design Style

- Avoid blue, indigo, or purple colors
- Choose color palettes according to character identity
- Adopt calm yet vibrant manga/cartoon aesthetic
- No gradient or shadow
- Maintain clean, simple design without compromising detail richness
- **No hover transitions or animations**

## Content Approach

- Integrate character details seamlessly into webpage narrative
- Mirror popular social media formats (WeChat articles, Xiaohongshu posts, etc.)
- Ensure high readability and visual engagement
- Include comprehensive information while maintaining aesthetic appeal

## Technical Requirements

- **Use Tailwind CSS for all styling** (include CDN link)
- **Output plain HTML only** - no separate CSS files
- Ensure responsive design with Tailwind's responsive utilities
- Focus on clean, semantic HTML structure
- **Use Lucide icons instead of emojis** (include Lucide CDN)
  - example `<i data-lucide="award" class="w-8 h-8 mr-3 text-custom-secondary-yellow"></i>`
  - use `window.lucide?.createIcons()` to initialize lucide
- Implement proper Tailwind color classes for your chosen palette
- It should be a single page with no real external link or download button

## Visual Elements

- **Icons**: Prefer Lucide icons over emojis for better consistency
- **Interactivity**: Static design - no hover effects or transitions
- **Layout**: Utilize Tailwind's flexbox and grid utilities for responsive layouts

## Image Integration

- Use AI-generated images with the format: https://anyimage.bullet-on-bible.workers.dev/{image-name}.jpg
- Place relevant keywords in the alt attribute (keep it concise, 2-4 keywords)
- Include character portraits, scene illustrations, and relevant visual elements
- Use descriptive, keyword-rich filenames; the image service searches Pixabay by filename
- Example: <img src="https://anyimage.bullet-on-bible.workers.dev/medieval-knight.jpg" alt="knight warrior armor">
- Use at most 3 images
- Avoid special characters and spaces in filenames - use hyphens instead

## Expected Output Format

Just output the final html and wrap it in code block

```html
<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>[Character-appropriate title]</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <script src="https://unpkg.com/lucide@latest/dist/umd/lucide.js"></script>
  </head>
  <body>
    <!-- Complete webpage content with Tailwind classes -->
    <!-- Must contain at least 300 words across all text content -->
  </body>
</html>
```

Generate the webpage in Chinese"#;

/// Sampling temperature used when the configuration does not override it.
pub const DEFAULT_TEMPERATURE: f64 = 0.4;

/// The caller-supplied facts a page is generated from.
#[derive(Debug, Clone)]
pub struct CharacterBrief {
    pub character_name: String,
    pub character_setting: String,
    pub webpage_title: String,
    pub character_comment: String,
}

/// Instruction used for JSON submissions.
pub fn json_prompt(brief: &CharacterBrief) -> String {
    format!(
        "角色名字：{name}\n\n\
         角色设定：{setting}\n\n\
         网页标题：{title}\n\n\
         角色转发网页时的评论：{comment}\n\n\
         请根据以上信息生成一个关于\"{name}\"的角色页面。",
        name = brief.character_name,
        setting = brief.character_setting,
        title = brief.webpage_title,
        comment = brief.character_comment,
    )
}

/// Instruction used for form submissions.
///
/// Keeps the page centred on the title and treats the character's comment
/// as a hint that must not be quoted on the page.
pub fn form_prompt(brief: &CharacterBrief) -> String {
    format!(
        "请根据我所提供的角色信息以及明确的网页标题，精心打造出与之高度契合的网页。\
         在创作过程中，务必仔细研读角色设定，确保网页内容能够紧密结合该角色所处的世界观，\
         但要完全围绕网页标题，不能刻意使用太多角色信息\n\n\
         角色名字：{name}\n\n\
         角色设定：{setting}\n\n\
         网页标题：{title}\n\n\
         注意：{name}转发了这个网页并评论：“{comment}”，\
         设计网页时可以考虑这条评价并巧妙的融入其中，但网页中不要直接暴露这条转发评论，仅作参考",
        name = brief.character_name,
        setting = brief.character_setting,
        title = brief.webpage_title,
        comment = brief.character_comment,
    )
}

/// Human-facing description stored alongside a submitted page.
pub fn page_description(character_name: &str) -> String {
    format!("关于角色 {character_name} 的页面")
}
