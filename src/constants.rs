// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const DEFAULT_SITE_ORIGIN: &str = "https://escuelafullstack.com";
pub const DEFAULT_COOKIES_FILE: &str = "cookies.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_SETTLE_DELAY_SECS: u64 = 5;
pub const DEFAULT_PATH_LIMIT: usize = 200;
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const LOG_FILE_TIME_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_DOWNLOAD_TOOL: &str = "yt-dlp";
pub const DEFAULT_DOWNLOAD_BACKEND: &str = "aria2c";

pub const UNTITLED_MODULE: &str = "Untitled Module";
pub const UNTITLED_CHAPTER: &str = "Untitled Chapter";
pub const FALLBACK_COURSE_SLUG: &str = "course";
pub const RESOURCES_FILE_SUFFIX: &str = "_recursos.txt";
pub const NO_CONTENT_REASON: &str = "no video or resources found";

/// 课程页面与章节页面中使用的结构标记
pub mod markup {
    pub const MODULE_CONTAINER: &str = "li.o_wslides_slide_list_category, li.mt-4";
    pub const MODULE_TITLE: &str = "div.o_wslides_slide_list_category_header span.text-muted";
    pub const CHAPTER_LIST: &str = "ul.list-unstyled";
    pub const CHAPTER_ITEM: &str = "li.o_wslides_slides_list_slide";
    pub const CHAPTER_LINK: &str = "a.o_wslides_js_slides_list_slide_link[href]";
    pub const NOT_EDITABLE_CLASS: &str = "o_not_editable";
    pub const EMPTY_LIST_CLASS: &str = "o_wslides_js_slides_list_empty";

    pub const VIDEO_SOURCE: &str = r#"video source[type="video/mp4"][src]"#;
    pub const RESOURCE_LINK: &str = "a.o_wslides_fs_slide_link[href]";
}

pub const HELP_COOKIES_GUIDE: &str = r#"
1. 使用 Chrome / Edge / Firefox 登录 https://escuelafullstack.com 。
2. 安装任意一个可以导出 JSON 格式 Cookie 的浏览器扩展
   (例如 "Cookie-Editor")。
3. 在课程页面打开扩展，选择 "Export" → "JSON"。
4. 将导出的内容保存为当前目录下的 cookies.json，
   或通过 --cookies <FILE> 指定其路径。
5. Cookie 过期后需要重新导出。"#;
