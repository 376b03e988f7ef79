use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_routes_file")]
    pub routes_file: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            routes_file: default_routes_file(),
            output_file: default_output_file(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    /// Print the text rendering of both grids after packing.
    #[serde(default = "default_render_text")]
    pub text: bool,
    /// PNG output prefix; `<prefix>_chanx.png` and `<prefix>_chany.png` are written.
    #[serde(default)]
    pub image_prefix: Option<String>,
    #[serde(default = "default_image_size")]
    pub image_width: u32,
    #[serde(default = "default_image_size")]
    pub image_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            text: default_render_text(),
            image_prefix: None,
            image_width: default_image_size(),
            image_height: default_image_size(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_gen_width")]
    pub width: u32,
    #[serde(default = "default_gen_height")]
    pub height: u32,
    #[serde(default = "default_gen_routes")]
    pub routes: usize,
    #[serde(default = "default_gen_max_length")]
    pub max_length: u32,
    #[serde(default = "default_gen_bent_ratio")]
    pub bent_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: default_gen_width(),
            height: default_gen_height(),
            routes: default_gen_routes(),
            max_length: default_gen_max_length(),
            bent_ratio: default_gen_bent_ratio(),
        }
    }
}

fn default_routes_file() -> String {
    "inputs/routes.txt".to_string()
}

fn default_output_file() -> String {
    "output/channels.txt".to_string()
}

fn default_render_text() -> bool {
    true
}

fn default_image_size() -> u32 {
    1000
}

fn default_gen_width() -> u32 {
    16
}

fn default_gen_height() -> u32 {
    16
}

fn default_gen_routes() -> usize {
    64
}

fn default_gen_max_length() -> u32 {
    6
}

fn default_gen_bent_ratio() -> f64 {
    0.1
}
