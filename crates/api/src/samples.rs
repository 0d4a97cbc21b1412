//! Built-in sample pages, imported when the sample directory cannot be read.

/// Metadata of one built-in sample page.
#[derive(Debug, Clone, Copy)]
pub struct SamplePage {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub model: &'static str,
}

pub const SAMPLE_PAGES: &[SamplePage] = &[
    SamplePage {
        slug: "flash-2.5-high-reasoning",
        title: "Akso医院6月表彰名单：黎深医师特刊",
        description: "在Akso医院的六月表彰名单中，我们荣幸地将最高荣誉授予心外科主任医师——黎深。",
        model: "flash 2.5 high reasoning",
    },
    SamplePage {
        slug: "flash-2.5-low-reasoning",
        title: "Akso医院6月表彰名单",
        description: "Flash 2.5 low reasoning model generated page for Li Shen character profile.",
        model: "flash 2.5 low reasoning",
    },
    SamplePage {
        slug: "gpt-5-mini",
        title: "Akso医院6月表彰名单",
        description: "GPT-5 mini model generated page for Li Shen character profile.",
        model: "gpt 5 mini",
    },
    SamplePage {
        slug: "gpt-5-mini-retry",
        title: "Akso医院6月表彰名单",
        description: "GPT-5 mini retry model generated page for Li Shen character profile.",
        model: "gpt 5 mini retry",
    },
    SamplePage {
        slug: "qwen3-232b",
        title: "Akso医院6月表彰名单",
        description: "Qwen3 232B model generated page for Li Shen character profile.",
        model: "qwen3 232b",
    },
    SamplePage {
        slug: "sonnet-4",
        title: "Akso医院6月表彰名单",
        description: "Claude Sonnet 4 model generated page for Li Shen character profile.",
        model: "sonnet 4",
    },
    SamplePage {
        slug: "streaming-page-demo",
        title: "Streaming Page Demo",
        description: "Streaming page demonstration for character profile generation.",
        model: "streaming demo",
    },
];

impl SamplePage {
    /// A minimal standalone document carrying this sample's metadata.
    pub fn html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="description" content="{description}">
</head>
<body>
    <h1>{title}</h1>
    <p>{description}</p>
    <p>Generated by: {model}</p>
    <p>This is a sample HTML page for testing the database insertion functionality.</p>
</body>
</html>"#,
            title = self.title,
            description = self.description,
            model = self.model,
        )
    }
}
