//! User-facing strings and fixed locators.

pub const APP_NAME: &str = "LoadApp";
pub const APP_DESCRIPTION: &str = "Downloading a GitHub repository";

pub const DOWNLOAD: &str = "Download";
pub const BUTTON_LOADING: &str = "Loading…";

pub const URL_GLIDE: &str = "https://github.com/bumptech/glide/archive/master.zip";
pub const URL_LOAD_APP: &str =
    "https://github.com/udacity/nd940-c3-advanced-android-programming-project-starter/archive/master.zip";
pub const URL_RETROFIT: &str = "https://github.com/square/retrofit/archive/master.zip";

pub const GLIDE_TEXT: &str = "Glide - Image Loading Library by BumpTech";
pub const LOAD_APP_TEXT: &str = "LoadApp - Current repository by Udacity";
pub const RETROFIT_TEXT: &str = "Retrofit - Type-safe HTTP client for Android and Java by Square, Inc";

pub const GLIDE_MESSAGE: &str = "Downloading Glide...";
pub const LOAD_APP_MESSAGE: &str = "Downloading LoadApp...";
pub const RETROFIT_MESSAGE: &str = "Downloading Retrofit...";
pub const NO_SELECTED_ITEM: &str = "Please select the file to download";

pub const NOTIFICATION_CHANNEL_ID: &str = "github_channel";
pub const NOTIFICATION_CHANNEL_NAME: &str = "GitHub repository downloads";
pub const NOTIFICATION_TITLE: &str = "Udacity: Android Kotlin Nanodegree";
pub const NOTIFICATION_DESCRIPTION: &str = "The Project 3 repository is downloaded";
pub const ACTION_NOTIFICATION_DOWNLOAD: &str = "Check the status";

pub const SUCCESS: &str = "Success";
pub const FAILED: &str = "Fail";

pub const DETAIL_FILE_NAME: &str = "File name";
pub const DETAIL_STATUS: &str = "Status";
pub const OK: &str = "OK";
