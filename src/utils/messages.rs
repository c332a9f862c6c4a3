// ============================================================================
// MENSAJES - Textos visibles para el usuario (zh-TW)
// ============================================================================

pub const UNKNOWN_ERROR: &str = "未知錯誤";

// --- Permiso de cámara ---

pub const CAMERA_REFUSED: &str =
    "您已拒絕攝影機存取權限。請在瀏覽器設定中允許攝影機存取以使用此功能。";
pub const CAMERA_NOT_FOUND: &str = "找不到攝影機。請確認您的裝置已連接攝影機並被系統偵測到。";
pub const CAMERA_BUSY: &str = "攝影機目前可能被其他應用程式使用中，或發生硬體錯誤。";
pub const CAMERA_DENIED_FALLBACK: &str =
    "未能獲得攝影機存取權限。請檢查您的瀏覽器設定，確保已允許本網站使用攝影機，然後重新整理頁面。";
pub const CAMERA_TOAST_TITLE: &str = "攝影機存取錯誤";
pub const CAMERA_TOAST_DESCRIPTION: &str =
    "請允許攝影機權限以掃描卡片。如果您已拒絕，請檢查瀏覽器設定。";

pub fn camera_other(name: Option<&str>) -> String {
    format!("無法存取攝影機。請檢查瀏覽器設定。({})", name.unwrap_or(UNKNOWN_ERROR))
}

// --- Ciclo de vida del scanner ---

pub const SCANNER_READY: &str = "AR 掃描器已準備就緒。請將角色卡對準攝影機。";

pub fn recognized(card_name: &str) -> String {
    format!("成功辨識卡片：{}！", card_name)
}

pub const RECOGNITION_TOAST_TITLE: &str = "AR 辨識問題";

pub fn unrecognized(value: &str) -> String {
    format!(
        "收到無法識別的卡片名稱：「{}」。請確保您的卡片正確，或調整 MindAR 設定。",
        value
    )
}

pub fn unrecognized_toast(value: &str) -> String {
    format!("未能從 AR 辨識出已知的角色卡。收到：「{}」", value)
}

pub const NO_TARGET: &str =
    "AR 掃描器回報「未知卡片」：畫面中沒有可辨識的角色卡。請將整張卡片置於攝影機畫面中央。";
pub const NO_TARGET_TOAST: &str = "未能辨識畫面中的卡片（未知卡片）。";

pub const SCANNER_ERROR_TOAST_TITLE: &str = "AR 掃描器錯誤";
pub const SCANNER_ERROR_TOAST_FALLBACK: &str =
    "MindAR 內部發生未知錯誤。請檢查瀏覽器開發者工具中的 iframe console 以獲取更多資訊。";

pub fn scanner_error(message: Option<&str>) -> String {
    format!("AR 掃描器錯誤：{}", message.unwrap_or(UNKNOWN_ERROR))
}

pub fn timeout(secs: u32) -> String {
    format!(
        "AR 掃描器啟動超時 ({}秒)。\n\n\
         主要原因極可能是 `targets.mind` 檔案問題！\n\n\
         iframe Console 中的 `RangeError: Extra ... byte(s) found at buffer` 錯誤表示 MindAR 無法正確解析 `targets.mind` 檔案。這通常是因為：\n\
         1. `targets.mind` 檔案本身已損壞或格式不正確。\n\
         2. 版本不相容：編譯 `targets.mind` 的 MindAR 編譯器版本與 `public/mindar/index.html` 使用的函式庫版本 (`1.2.5`) 不符。\n\n\
         解決方案：\n\
         - 使用與 MindAR `1.2.5` 相容的編譯器重新編譯 `targets.mind`。\n\
         - 檢查原始圖像是否清晰且適合 AR 追蹤。\n\
         - 打開瀏覽器開發者工具 (F12)，在 AR 掃描器區域按右鍵選「檢查」，查看該 iframe 的主控台 (Console)。",
        secs
    )
}

pub const TIMEOUT_TOAST_TITLE: &str = "AR 掃描器超時 - 請檢查 `targets.mind`!";
pub const TIMEOUT_TOAST_DESCRIPTION: &str =
    "MindAR 未能準備就緒。極有可能是 `targets.mind` 檔案問題導致的 `RangeError`。請檢查 iframe 的 Console！";

pub const FRAME_LOAD_ERROR: &str =
    "載入 AR 掃描器 iframe 時發生錯誤。請檢查路徑是否正確 (public/mindar/index.html) 以及檔案內容。同時檢查主控台是否有 CSP 或其他錯誤。";
pub const FRAME_LOAD_TOAST_TITLE: &str = "Iframe 載入錯誤";
pub const FRAME_LOAD_TOAST_DESCRIPTION: &str = "無法載入 AR 掃描器。請檢查路徑、檔案內容以及瀏覽器 Console。";

pub fn listener_error(detail: &str) -> String {
    format!("無法監聽 AR 掃描器訊息：{}", detail)
}

// --- Vista ---

pub const WIDGET_TITLE: &str = "AR 角色卡掃描器";
pub const REQUESTING_HEADLINE: &str = "正在請求攝影機權限...";
pub const REQUESTING_HINT: &str = "請在瀏覽器提示時允許存取您的攝影機。";
pub const DENIED_TITLE: &str = "攝影機存取失敗";
pub const DENIED_BANNER_TITLE: &str = "無法啟動攝影機";
pub const RELOAD_BUTTON: &str = "重新整理頁面";
pub const ACTIVE_DESCRIPTION: &str =
    "攝影機已啟用。請將您的角色卡置於攝影機畫面中。如果掃描器長時間未就緒或畫面持續黑色，請打開瀏覽器開發者工具 (F12) 並檢查 iframe 的 Console。";
pub const LOADING_HEADLINE: &str = "正在啟動 AR 掃描器...";
pub const LOADING_HINT: &str =
    "請稍候，MindAR 正在載入。如果長時間無反應，請檢查 iframe 的主控台 (Console)，確認 `targets.mind` 是否正確載入。";
