//! Canned prompt templates published over MCP `prompts/*`.
//!
//! Each template is a text file under `data/prompts/` with `{{name}}`
//! placeholders. Missing or empty arguments fall back to per-template
//! defaults; a few templates derive extra placeholders (lookup tables,
//! optional notes) from the arguments before rendering.

use std::collections::HashMap;

/// Fill `{{key}}` placeholders in a single left-to-right pass.
///
/// Inserted values are copied through verbatim and never rescanned, so a
/// value that itself looks like a placeholder stays literal. Unknown
/// placeholders are left as written.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => {
                result.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                result.push_str("{{");
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

#[derive(Debug, Clone, Copy)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

const fn required(name: &'static str, description: &'static str) -> PromptArgument {
    PromptArgument {
        name,
        description,
        required: true,
    }
}

const fn optional(name: &'static str, description: &'static str) -> PromptArgument {
    PromptArgument {
        name,
        description,
        required: false,
    }
}

/// Resolved placeholder values for one render.
#[derive(Debug, Default)]
pub struct PromptVars {
    values: HashMap<String, String>,
}

impl PromptVars {
    /// Empty string when unset.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

type Derive = fn(&PromptVars) -> Vec<(&'static str, String)>;

pub struct PromptDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
    template: &'static str,
    defaults: &'static [(&'static str, &'static str)],
    derive: Option<Derive>,
}

impl PromptDefinition {
    /// Render the user message text for the given arguments.
    pub fn build_message(&self, args: &HashMap<String, String>) -> String {
        let mut vars = PromptVars::default();

        for argument in self.arguments {
            let value = args
                .get(argument.name)
                .filter(|value| !value.is_empty())
                .cloned()
                .or_else(|| self.default_for(argument.name).map(str::to_string))
                .unwrap_or_default();
            vars.set(argument.name, value);
        }

        if let Some(derive) = self.derive {
            for (key, value) in derive(&vars) {
                vars.set(key, value);
            }
        }

        let pairs: Vec<(&str, &str)> = vars
            .values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();

        render(self.template, &pairs).trim_end().to_string()
    }

    fn default_for(&self, name: &str) -> Option<&'static str> {
        self.defaults
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

pub fn catalog() -> &'static [PromptDefinition] {
    &CATALOG
}

pub fn find(name: &str) -> Option<&'static PromptDefinition> {
    CATALOG.iter().find(|prompt| prompt.name == name)
}

fn scroll_painting_style(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let style = match vars.get("variant") {
        "ink-wash" => "monochrome Chinese ink wash (水墨画) style with dynamic brush strokes",
        "ghibli" => "Studio Ghibli animation style with warm colors and whimsical details",
        "pixel-art" => "detailed pixel art style with retro charm",
        _ => "traditional Chinese ink wash and color painting style, inspired by Along the River During the Qingming Festival (清明上河图)",
    };
    vec![("style_description", style.to_string())]
}

fn resize_notes(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let language_note = match vars.get("language") {
        "" => String::new(),
        language => format!(", translate all visible text to {}", language),
    };
    let extra_note = match vars.get("additional_instructions") {
        "" => String::new(),
        extra => format!(". Also: {}", extra),
    };
    vec![("language_note", language_note), ("extra_note", extra_note)]
}

fn scene_list(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let scenes: Vec<&str> = vars
        .get("scenes")
        .split(',')
        .map(str::trim)
        .filter(|scene| !scene.is_empty())
        .collect();
    let list = scenes
        .iter()
        .enumerate()
        .map(|(i, scene)| format!("Scene {}: {}", i + 1, scene))
        .collect::<Vec<_>>()
        .join("; ");
    vec![("scene_count", scenes.len().to_string()), ("scene_list", list)]
}

fn knowledge_card_layout(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let layout = match vars.get("card_type") {
        "species" => "Include: scientific name, habitat, diet, conservation status, size comparison, and distribution map icon. Main illustration should be a detailed realistic portrait in its natural habitat.",
        "landmark" => "Include: location, history highlights, visiting tips, architectural style, and a fun fact. Main illustration should be a beautiful scenic view.",
        "food" => "Include: origin, key ingredients, nutrition facts, flavor profile, and preparation time. Main illustration should be an appetizing food photography style shot.",
        _ => "Include: key facts, interesting trivia, related topics, and a timeline if applicable. Main illustration should be visually engaging and informative.",
    };
    vec![("layout", layout.to_string())]
}

fn brand_icon_note(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let note = match vars.get("icon_idea") {
        "" => String::new(),
        idea => format!("Icon concept: {}. ", idea),
    };
    vec![("icon_note", note)]
}

fn whiteboard_density(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let note = match vars.get("density") {
        "dense" => "Pack more details and data points into the diagram, minimal whitespace.",
        "sparse" => "Keep very loose with 40%+ whitespace, only key concepts.",
        _ => "Maintain 30%+ whitespace, balance between detail and clarity.",
    };
    vec![("density_note", note.to_string())]
}

fn cover_text_note(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let note = match vars.get("text") {
        "" => String::new(),
        text => format!(
            " The text '{}' is cleverly integrated into the design composition.",
            text
        ),
    };
    vec![("text_note", note)]
}

fn timeline_orientation(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let (ratio, flow) = match vars.get("orientation") {
        "vertical" => ("1:8", "top to bottom"),
        _ => ("8:1", "left to right"),
    };
    vec![
        ("aspect_ratio", ratio.to_string()),
        ("flow_direction", flow.to_string()),
    ]
}

fn city_slogan_note(vars: &PromptVars) -> Vec<(&'static str, String)> {
    let note = match vars.get("slogan") {
        "" => String::new(),
        slogan => format!(" A speech bubble at the top reads '{}'.", slogan),
    };
    vec![("slogan_note", note)]
}

static CATALOG: [PromptDefinition; 17] = [
    PromptDefinition {
        name: "ultra_wide_panorama",
        title: "Ultra-Wide City Panorama",
        description: "Generate an 8:1 ultra-wide panoramic cityscape — perfect for website banners, outdoor ads, and immersive wall art. Uses the Nano Banana 2 exclusive 8:1 aspect ratio.",
        arguments: &[
            required("city", "City name (e.g., Shanghai, Tokyo, New York)"),
            optional("style", "Art style (e.g., photorealistic, watercolor, cyberpunk, ink wash)"),
            optional("time_of_day", "Time of day (e.g., sunrise, golden hour, night)"),
            optional("resolution", "Resolution: 512px, 1K, 2K, or 4K (default: 2K)"),
        ],
        template: include_str!("../data/prompts/ultra_wide_panorama.txt"),
        defaults: &[
            ("city", "Shanghai"),
            ("style", "photorealistic aerial photography"),
            ("time_of_day", "golden hour"),
            ("resolution", "2K"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "weather_infographic",
        title: "Real-Time Weather Infographic",
        description: "Generate a weather infographic with real-time data via Google Search grounding. The model searches for current weather conditions before generating an accurate visual.",
        arguments: &[
            required("city", "City name (e.g., Beijing, San Francisco)"),
            optional("language", "Display language (e.g., Chinese, English, Japanese)"),
            optional("days", "Forecast range (e.g., today, 3-day, 5-day, 7-day)"),
        ],
        template: include_str!("../data/prompts/weather_infographic.txt"),
        defaults: &[("city", "Beijing"), ("language", "Chinese"), ("days", "5-day")],
        derive: None,
    },
    PromptDefinition {
        name: "ecommerce_banner",
        title: "E-Commerce Product Banner",
        description: "Generate a 4:1 wide-format product promotion banner — ideal for website hero sections, marketplace headers, and email campaigns.",
        arguments: &[
            required("product", "Product name and brief description"),
            optional("promotion", "Promotion text (e.g., Summer Sale 50% Off)"),
            optional("color_theme", "Color theme (e.g., red and gold, minimalist white, dark luxury)"),
            optional("resolution", "Resolution: 512px, 1K, 2K, or 4K (default: 2K)"),
        ],
        template: include_str!("../data/prompts/ecommerce_banner.txt"),
        defaults: &[
            ("product", "wireless headphones"),
            ("promotion", "New Arrival"),
            ("color_theme", "modern gradient"),
            ("resolution", "2K"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "product_detail_long",
        title: "Vertical Product Detail Page",
        description: "Generate a 1:4 ultra-tall vertical layout — perfect for mobile product detail pages, Instagram story sequences, and scrollable infographics.",
        arguments: &[
            required("product", "Product name and key features"),
            optional("sections", "Number of visual sections (e.g., 3, 4, 5)"),
            optional("style", "Visual style (e.g., Apple minimalist, vibrant lifestyle, technical blueprint)"),
        ],
        template: include_str!("../data/prompts/product_detail_long.txt"),
        defaults: &[
            ("product", "smart watch"),
            ("sections", "4"),
            ("style", "Apple minimalist"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "scroll_painting_panorama",
        title: "Chinese Scroll Painting Panorama",
        description: "Generate an 8:1 ultra-wide scene inspired by classic Chinese horizontal scroll paintings — reimagining modern cities in the style of 'Along the River During the Qingming Festival'.",
        arguments: &[
            required("city", "City name to reimagine (e.g., Chengdu, Hangzhou, Chongqing)"),
            optional("variant", "Style variant: ink-wash, ghibli, pixel-art, or traditional (default: traditional)"),
            optional("resolution", "Resolution: 1K, 2K, or 4K (default: 2K)"),
        ],
        template: include_str!("../data/prompts/scroll_painting_panorama.txt"),
        defaults: &[
            ("city", "Hangzhou"),
            ("variant", "traditional"),
            ("resolution", "2K"),
        ],
        derive: Some(scroll_painting_style),
    },
    PromptDefinition {
        name: "resize_and_enhance",
        title: "Resize & Enhance Image",
        description: "Intelligently resize an existing image to a new aspect ratio while preserving content structure, and optionally upscale resolution. Great for adapting content across platforms.",
        arguments: &[
            required("target_ratio", "Target aspect ratio (e.g., 16:9, 9:16, 4:1, 1:1)"),
            optional("target_resolution", "Target resolution: 512px, 1K, 2K, or 4K (default: 2K)"),
            optional("language", "If the image has text, translate to this language (e.g., Chinese, English)"),
            optional("additional_instructions", "Any additional editing instructions"),
        ],
        template: include_str!("../data/prompts/resize_and_enhance.txt"),
        defaults: &[("target_ratio", "16:9"), ("target_resolution", "2K")],
        derive: Some(resize_notes),
    },
    PromptDefinition {
        name: "character_multi_scene",
        title: "Character Consistency Multi-Scene",
        description: "Generate images of a consistent character across multiple scenes — ideal for storyboards, comics, social media series, and virtual influencer content.",
        arguments: &[
            required("character_description", "Detailed character description (appearance, clothing, features)"),
            required("scenes", "Comma-separated scene descriptions (e.g., park, library, cafe, train station)"),
            optional("style", "Art style (e.g., anime, photorealistic, watercolor, comic)"),
        ],
        template: include_str!("../data/prompts/character_multi_scene.txt"),
        defaults: &[
            (
                "character_description",
                "a young woman with short black hair, wearing a white blouse and navy skirt",
            ),
            ("scenes", "park, library, cafe"),
            ("style", "photorealistic"),
        ],
        derive: Some(scene_list),
    },
    PromptDefinition {
        name: "knowledge_card",
        title: "Search-Grounded Knowledge Card",
        description: "Generate a beautiful illustrated knowledge card / species profile with real-time search data — perfect for educational content, nature guides, and encyclopedia entries.",
        arguments: &[
            required("subject", "Subject to illustrate (e.g., Yellow-rumped Warbler, Giant Panda, Monarch Butterfly)"),
            optional("card_type", "Card type: species, landmark, food, or general (default: species)"),
            optional("language", "Display language (default: Chinese)"),
        ],
        template: include_str!("../data/prompts/knowledge_card.txt"),
        defaults: &[
            ("subject", "Monarch Butterfly"),
            ("card_type", "species"),
            ("language", "Chinese"),
        ],
        derive: Some(knowledge_card_layout),
    },
    PromptDefinition {
        name: "comic_storyboard",
        title: "Comic / Storyboard Panels",
        description: "Generate a multi-panel comic storyboard with consistent characters and a cohesive narrative — great for webcomics, pitch decks, and creative projects.",
        arguments: &[
            required("story", "Brief story outline or scenario description"),
            optional("panels", "Number of panels (e.g., 4, 6, 8, default: 6)"),
            optional("style", "Comic style (e.g., manga, Marvel, European BD, ink-wash, minimalist)"),
            optional("character", "Main character description for consistency"),
        ],
        template: include_str!("../data/prompts/comic_storyboard.txt"),
        defaults: &[
            ("story", "A robot discovers a garden in an abandoned city"),
            ("panels", "6"),
            ("style", "manga"),
            ("character", "the main character"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "brand_logo_system",
        title: "Brand Logo & Visual Identity",
        description: "Generate a brand logo with visual identity explorations — including logo, color palette, typography suggestion, and mockup applications. Uses thinking mode for precise design.",
        arguments: &[
            required("brand_name", "Brand / company name"),
            optional("industry", "Industry or domain (e.g., tech startup, organic food, fitness app)"),
            optional("keywords", "Design keywords (e.g., modern, playful, premium, eco-friendly)"),
            optional("icon_idea", "Icon concept hint (e.g., a leaf, abstract wave, geometric bird)"),
        ],
        template: include_str!("../data/prompts/brand_logo_system.txt"),
        defaults: &[
            ("brand_name", "TechFlow"),
            ("industry", "tech startup"),
            ("keywords", "modern, clean, innovative"),
        ],
        derive: Some(brand_icon_note),
    },
    PromptDefinition {
        name: "whiteboard_infographic",
        title: "Whiteboard Stickman Infographic",
        description: "Generate an 'expert whiteboard teaching' style infographic with marker-drawn diagrams, stickman instructor, and clean visual hierarchy — perfect for article illustrations, tutorials, and social media explainers.",
        arguments: &[
            required("topic", "Topic or content to visualize (e.g., 'How HTTP works', 'Machine Learning pipeline')"),
            optional("language", "Text language: Chinese, English, or bilingual (default: bilingual)"),
            optional("density", "Information density: sparse, moderate, or dense (default: moderate)"),
        ],
        template: include_str!("../data/prompts/whiteboard_infographic.txt"),
        defaults: &[
            ("topic", "How AI image generation works"),
            ("language", "bilingual Chinese and English"),
            ("density", "moderate"),
        ],
        derive: Some(whiteboard_density),
    },
    PromptDefinition {
        name: "minimalist_cover",
        title: "Minimalist Negative Space Cover",
        description: "Generate a minimalist negative space cover design with bold silhouette and limited colors — ideal for notebook covers, book jackets, brand stationery, and merchandise.",
        arguments: &[
            required("subject", "Subject silhouette (e.g., flying bird, cat, mountain, flower)"),
            optional("subject_color", "Color of the silhouette (e.g., white, black, red)"),
            optional("background_color", "Background color (e.g., deep green, navy blue, orange)"),
            optional("text", "Optional text to integrate into the design (e.g., a short phrase or title)"),
        ],
        template: include_str!("../data/prompts/minimalist_cover.txt"),
        defaults: &[
            ("subject", "flying bird"),
            ("subject_color", "white"),
            ("background_color", "deep teal"),
        ],
        derive: Some(cover_text_note),
    },
    PromptDefinition {
        name: "vertical_comic_strip",
        title: "Vertical Comic Strip (9:16)",
        description: "Generate a 9:16 vertical comic strip with sequential panels flowing top to bottom — ideal for Webtoon-style comics, social media stories, and mobile-first content.",
        arguments: &[
            required("story", "Story outline with panel descriptions"),
            optional("panels", "Number of panels (e.g., 4, 6, 8, default: 6)"),
            optional("style", "Art style (e.g., Q-version cute, manga, chibi, pixel-art)"),
            optional("language", "Dialogue language (default: Chinese)"),
        ],
        template: include_str!("../data/prompts/vertical_comic_strip.txt"),
        defaults: &[
            (
                "story",
                "A day in the life of an office worker: alarm, subway, lunch, drowning in emails, moonlit exit, phone in bed",
            ),
            ("panels", "6"),
            ("style", "Q-version cute chibi"),
            ("language", "Chinese"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "ecommerce_product_suite",
        title: "E-Commerce Product Image Suite",
        description: "Generate a complete set of product display images for e-commerce — main image, lifestyle scene, feature callouts, and size/scale reference. Upload a product photo as reference.",
        arguments: &[
            required("product", "Product name and type (e.g., artisan perfume, wireless earbuds)"),
            required("selling_points", "Key selling points to highlight (e.g., natural ingredients, 40-hour battery)"),
            optional("scene", "Lifestyle scene context (e.g., modern bathroom, outdoor adventure)"),
            optional("style", "Photography style (e.g., luxury minimalist, warm lifestyle, studio white)"),
        ],
        template: include_str!("../data/prompts/ecommerce_product_suite.txt"),
        defaults: &[
            ("product", "artisan perfume"),
            (
                "selling_points",
                "natural botanical extracts, long-lasting fragrance, handcrafted glass bottle",
            ),
            ("scene", "an elegant vanity table with soft morning light"),
            ("style", "luxury minimalist"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "blindbox_miniature_store",
        title: "Brand Blind Box Miniature Store",
        description: "Generate a 3D Q-version miniature store scene in blind box/figurine aesthetic — perfect for brand social media, fan merchandise concepts, and marketing campaigns.",
        arguments: &[
            required("brand", "Brand or store name and type (e.g., 'Starbucks coffee shop', 'Nintendo game store')"),
            optional("details", "Specific scene details (e.g., exterior style, window display, characters outside)"),
            optional("color_mood", "Color mood (e.g., warm afternoon, pastel spring, neon night)"),
        ],
        template: include_str!("../data/prompts/blindbox_miniature_store.txt"),
        defaults: &[
            ("brand", "a cozy bookstore cafe"),
            (
                "details",
                "Two-story mini building with large glass windows showing bookshelves and coffee bar inside. Q-version characters browsing books and sipping coffee outside.",
            ),
            ("color_mood", "warm afternoon sunlight"),
        ],
        derive: None,
    },
    PromptDefinition {
        name: "timeline_illustration",
        title: "Ultra-Long Timeline Illustration",
        description: "Generate an 8:1 or 1:8 ultra-long timeline illustration — ideal for historical timelines, product evolution, company milestones, and educational content.",
        arguments: &[
            required("subject", "Timeline subject (e.g., 'Chinese dynasties from Xia to 2026', 'Evolution of smartphones')"),
            optional("orientation", "horizontal (8:1) or vertical (1:8), default: horizontal"),
            optional("style", "Visual style (e.g., illustrated infographic, ink wash to modern gradient, flat design)"),
            optional("language", "Label language (default: Chinese)"),
        ],
        template: include_str!("../data/prompts/timeline_illustration.txt"),
        defaults: &[
            ("subject", "Chinese dynasties from Xia to 2026"),
            ("orientation", "horizontal"),
            (
                "style",
                "illustrated infographic with color gradient from ancient bronze tones to modern vivid colors",
            ),
            ("language", "Chinese"),
        ],
        derive: Some(timeline_orientation),
    },
    PromptDefinition {
        name: "city_food_culture_card",
        title: "City × Food × Culture Fusion Card",
        description: "Generate a 3D isometric miniature scene fusing a city's landmark, signature food, and local culture into one card — perfect for travel promotion, city IP branding, and cultural content.",
        arguments: &[
            required("city", "City name (e.g., Chengdu, Guangzhou, Tokyo)"),
            optional("food", "Signature food (e.g., hotpot, dim sum, ramen)"),
            optional("landmark", "City landmark (e.g., Wide and Narrow Alleys, Canton Tower)"),
            optional("slogan", "Local slogan or dialect phrase to display in a speech bubble"),
        ],
        template: include_str!("../data/prompts/city_food_culture_card.txt"),
        defaults: &[
            ("city", "Chengdu"),
            ("food", "boiling red-oil hotpot"),
            ("landmark", "Wide and Narrow Alleys"),
        ],
        derive: Some(city_slogan_note),
    },
];
