//! User-facing Arabic copy. Raw error text never reaches the page except
//! appended after one of these prefixes.

pub const CURRENCY: &str = "درهم";
pub const BRAND: &str = "MORROKY";

// Shared
pub const DENIED_TITLE: &str = "وصول مرفوض";
pub const DENIED_BODY: &str = "ليس لديك الصلاحيات اللازمة لعرض هذه الصفحة. يرجى تسجيل الدخول بحساب صحيح.";
pub const BACK_AND_SIGN_IN: &str = "العودة وتسجيل الدخول";
pub const BACK_HOME: &str = "العودة للرئيسية";
pub const BACK: &str = "العودة";
pub const LOAD_FAILED_TITLE: &str = "تعذر تحميل البيانات";
pub const LOAD_FAILED_BODY: &str = "حدث خطأ أثناء الاتصال بالخادم. يرجى المحاولة لاحقاً.";
pub const RETRY: &str = "إعادة المحاولة";
pub const SIGN_OUT: &str = "تسجيل الخروج";
pub const UNSUPPORTED_IMAGE: &str = "نوع الملف غير مدعوم. يرجى اختيار صورة";
pub const IMAGE_TOO_LARGE: &str = "حجم الصورة يتجاوز 10 ميغابايت";
pub const SIGN_OUT_FAILED: &str = "تعذر تسجيل الخروج";

// Widgets
pub const CONFIRM_YES: &str = "نعم";
pub const CONFIRM_CANCEL: &str = "إلغاء";

// Gateway
pub const GATEWAY_TAGLINE: &str = "الواقع أولاً ← المنصة تعكس الواقع فقط";
pub const GATEWAY_BUYER: &str = "أنا مشتري 🛍️";
pub const GATEWAY_BUYER_HINT: &str = "أبحث عن سلع بالجملة والتقسيط";
pub const GATEWAY_MERCHANT: &str = "أنا تاجر 🏪";
pub const GATEWAY_MERCHANT_HINT: &str = "أريد توثيق محلي وعرض سلعي";
pub const GATEWAY_FOOTER: &str = "خريطة رقمية واقعية للأسواق المغربية";

// Auth
pub const AUTH_LOGIN_TITLE: &str = "مرحباً بعودتك";
pub const AUTH_REGISTER_TITLE: &str = "انضم إلينا";
pub const AUTH_SUBTITLE: &str = "بوابة التجار - Morroky";
pub const AUTH_TAB_LOGIN: &str = "تسجيل دخول";
pub const AUTH_TAB_REGISTER: &str = "إنشاء حساب";
pub const AUTH_EMAIL: &str = "البريد الإلكتروني";
pub const AUTH_PASSWORD: &str = "كلمة المرور";
pub const AUTH_SUBMIT_LOGIN: &str = "الدخول للوحة التحكم";
pub const AUTH_SUBMIT_REGISTER: &str = "إنشاء حساب جديد";
pub const AUTH_GOOGLE: &str = "المتابعة باستخدام Google";
pub const PROCESSING: &str = "جاري المعالجة...";
pub const AUTH_EMAIL_REQUIRED: &str = "يرجى إدخال البريد الإلكتروني";
pub const AUTH_PASSWORD_TOO_SHORT: &str = "كلمة السر يجب أن تكون 6 أحرف على الأقل";
pub const AUTH_BAD_CREDENTIALS: &str = "البريد أو كلمة السر خاطئة";
pub const AUTH_FAILED: &str = "حدث خطأ أثناء عملية المصادقة";
pub const AUTH_GOOGLE_FAILED: &str = "تعذر الاتصال بخدمة Google";
pub const AUTH_POST_LOGIN_FAILED: &str = "حدث خطأ أثناء جلب بيانات التاجر";
pub const AUTH_ACCOUNT_CREATED: &str = "تم إنشاء الحساب بنجاح! يرجى تسجيل محلك الآن.";

// World
pub const WORLD_EXPLORE: &str = "استكشاف الأسواق";
pub const WORLD_MERCHANT_PANEL: &str = "لوحة التاجر";
pub const WORLD_EXIT: &str = "خروج";
pub const WORLD_WELCOME: &str = "مرحباً بك في عالم موروكي";
pub const WORLD_INTRO: &str = "هذه هي الخريطة الرقمية للأسواق المغربية. استكشف محلات درب عمر الموثقة.";
pub const WORLD_FILTER_BY: &str = "تصفية حسب:";
pub const WORLD_ALL_STREETS: &str = "كل الشوارع";
pub const WORLD_ALL_KISSARIAT: &str = "كل القيساريات";
pub const WORLD_ALL_ALLEYS: &str = "كل الأزقة";
pub const WORLD_VERIFIED_SHOPS: &str = "المحلات الموثقة";
pub const WORLD_REFRESHING: &str = "جاري تحديث القائمة...";
pub const WORLD_EMPTY: &str = "لا يوجد تجار هنا حالياً";
pub const WORLD_EMPTY_HINT: &str = "حاول تغيير خيارات التصفية للعثور على المزيد.";
pub const WORLD_SHOW_ADDRESS: &str = "اظهر عنوان هذا المحل";
pub const WORLD_REGISTER_SHOP: &str = "سجل محلك الآن";
pub const WORLD_NO_REJECTIONS: &str = "لا توجد أسباب رفض مسجلة لهذا المتجر";

pub fn shops_available(n: usize) -> String {
    format!("{n} متجر متوفر")
}

pub fn rejection_reasons(shop: &str, reasons: &[String]) -> String {
    let lines: Vec<String> = reasons.iter().map(|r| format!("- زبون: {r}")).collect();
    format!("أسباب الرفض لمتجر {shop}:\n{}", lines.join("\n"))
}

// Registration
pub const REG_TITLE: &str = "تسجيل محل جديد";
pub const REG_NAME: &str = "اسم المحل";
pub const REG_PHONE: &str = "رقم الهاتف (واتساب)";
pub const REG_LOCATION: &str = "الموقع الدقيق (درب عمر)";
pub const REG_CITY: &str = "المدينة";
pub const REG_MARKET: &str = "السوق";
pub const REG_STREET: &str = "الشارع";
pub const REG_KISSARIA: &str = "القيسارية";
pub const REG_ALLEY: &str = "الزقة/الممر";
pub const REG_SHOP_NUMBER: &str = "رقم المحل";
pub const REG_PICK_STREET: &str = "اختر الشارع...";
pub const REG_PICK_KISSARIA: &str = "اختر القيسارية...";
pub const REG_PICK_ALLEY: &str = "اختر الزقة...";
pub const REG_SUBMIT: &str = "إرسال للتوثيق";
pub const REG_SENDING: &str = "جاري الإرسال...";
pub const REG_HINT: &str = "بمجرد الإرسال، سيتم مراجعة طلبك وتوثيق محلك ليظهر للجميع.";
pub const REG_MISSING_FIELDS: &str = "يرجى ملء جميع الحقول المطلوبة";
pub const REG_FAILED: &str = "حدث خطأ أثناء الإرسال. يرجى المحاولة لاحقاً.";
pub const REG_SENT: &str = "تم إرسال طلبك بنجاح!";

// Merchant store page
pub const STORE_LOADING: &str = "جاري تحميل بيانات المتجر...";
pub const STORE_NOT_FOUND: &str = "عذراً، المتجر غير موجود";
pub const STORE_NOT_FOUND_BODY: &str = "قد يكون المتجر غير موثق بعد أو أن الرابط خاطئ.";
pub const STORE_BACK_TO_MAP: &str = "العودة للخريطة";
pub const STORE_WHATSAPP: &str = "تواصل عبر واتساب";
pub const STORE_WHATSAPP_TEXT: &str = "مرحباً، أود الاستفسار عن منتج";
pub const STORE_PRODUCTS: &str = "المنتجات المميزة 🛍️";
pub const STORE_NO_PRODUCTS: &str = "لا توجد منتجات حالياً";
pub const STORE_NO_PRODUCTS_HINT: &str = "صاحب المتجر لم يقم بإضافة أي منتجات بعد.";
pub const STORE_DETAILS: &str = "عرض التفاصيل";

// Admin
pub const ADMIN_TITLE: &str = "لوحة الإدارة";
pub const ADMIN_LOADING: &str = "جاري تحميل طلبات التوثيق...";
pub const ADMIN_NO_PENDING: &str = "لا توجد محلات في انتظار التوثيق.";
pub const ADMIN_NO_VERIFIED: &str = "لا توجد محلات موثقة بعد.";
pub const ADMIN_VERIFY: &str = "✔️ توثيق المحل";
pub const ADMIN_VERIFYING: &str = "⏳ جاري التوثيق...";
pub const ADMIN_VERIFIED_OK: &str = "✅ تم التوثيق بنجاح!";
pub const ADMIN_MANAGE: &str = "⚙️ إدارة";
pub const ADMIN_NO_PHONE: &str = "بدون هاتف";
pub const ADMIN_VERIFIED_BADGE: &str = "موثق ✅";

pub fn admin_pending(n: usize) -> String {
    format!("محلات في انتظار التوثيق ({n})")
}

pub fn admin_verified(n: usize) -> String {
    format!("المحلات الموثقة ({n})")
}

// Dashboard
pub const DASH_LOADING: &str = "جاري تحميل لوحة التحكم...";
pub const DASH_DENIED_TITLE: &str = "تم رفض الوصول";
pub const DASH_DENIED_BODY: &str = "ليس لديك صلاحية لعرض هذه الصفحة. يرجى تسجيل الدخول بحساب صحيح.";
pub const DASH_BRANDING: &str = "العلامة التجارية";
pub const DASH_CHANGE_LOGO: &str = "تغيير";
pub const DASH_CHANGE_BACKGROUND: &str = "تغيير الخلفية";
pub const DASH_ADD_PRODUCT: &str = "إضافة منتج جديد";
pub const DASH_PRODUCT_NAME: &str = "اسم المنتج";
pub const DASH_PRODUCT_PRICE: &str = "السعر (درهم)";
pub const DASH_PRODUCT_IMAGES: &str = "صور المنتج (حتى 4 صور)";
pub const DASH_ADD_IMAGE: &str = "إضافة صورة";
pub const DASH_SUBMIT_PRODUCT: &str = "+ إضافة منتج";
pub const DASH_LANDING_BUTTON: &str = "إنشاء صفحة هبوط";
pub const DASH_PICK_PRODUCT: &str = "اختر منتج للصفحة المقصودة";
pub const DASH_CUSTOMIZE: &str = "تخصيص";
pub const DASH_NEED_PRODUCTS: &str = "يجب إضافة منتجات أولاً.";
pub const DASH_MISSING_FIELDS: &str = "يرجى إدخال اسم المنتج وسعره";
pub const DASH_BAD_PRICE: &str = "السعر غير صالح";
pub const DASH_NEED_IMAGE: &str = "يرجى رفع صورة واحدة على الأقل للمنتج";
pub const DASH_PRODUCT_ADDED: &str = "تمت إضافة المنتج بنجاح!";
pub const DASH_DELETE_TITLE: &str = "حذف المنتج";
pub const DASH_DELETE_MESSAGE: &str = "هل أنت متأكد من حذف هذا المنتج؟ لا يمكن التراجع عن هذا الإجراء.";
pub const DASH_PRODUCT_DELETED: &str = "تم حذف المنتج.";
pub const DASH_IMAGE_UPDATED: &str = "تم تحديث الصورة بنجاح!";
pub const DASH_UPLOADING: &str = "جاري رفع الصورة...";
pub const DASH_ADDING: &str = "جاري إضافة المنتج...";
pub const DASH_DELETING: &str = "جاري حذف المنتج...";

pub fn dash_title(name: &str) -> String {
    format!("إدارة: {name}")
}

pub fn dash_products(n: usize) -> String {
    format!("منتجاتي ({n})")
}

pub fn failed(prefix: &str, message: &str) -> String {
    format!("{prefix}: {message}")
}

pub const ERROR_PREFIX: &str = "خطأ";
pub const UPLOAD_FAILED_PREFIX: &str = "فشل رفع الصورة";
pub const SAVE_FAILED_PREFIX: &str = "فشل حفظ البيانات";

// Landing page editor
pub const EDITOR_LOADING: &str = "جاري تحميل محرر صفحة الهبوط...";
pub const EDITOR_DENIED_BODY: &str = "ليس لديك الصلاحيات اللازمة لتعديل هذا المنتج. يرجى التأكد من أنك مالك المنتج.";
pub const EDITOR_SUBTITLE: &str = "صمم صفحة جذابة لمنتجك لزيادة فرصة الشراء.";
pub const EDITOR_HEADLINE: &str = "العنوان الرئيسي الجذاب";
pub const EDITOR_DESCRIPTION: &str = "وصف المنتج (لصفحة الهبوط)";
pub const EDITOR_SAVE: &str = "حفظ التغييرات";
pub const EDITOR_SAVED: &str = "تم حفظ صفحة الهبوط بنجاح!";
pub const EDITOR_BACK: &str = "العودة للوحة التحكم";

pub fn editor_title(name: &str) -> String {
    format!("تخصيص صفحة الهبوط لـ: {name}")
}

// Product pages
pub const PRODUCT_PAGE_MISSING: &str = "عذراً، صفحة المنتج غير موجودة";
pub const PRODUCT_PAGE_MISSING_BODY: &str = "قد يكون الرابط خاطئ أو أن المنتج لم يعد متوفراً.";
pub const PRODUCT_BACK_TO_EXPLORE: &str = "العودة للاستكشاف";
pub const PRODUCT_ABOUT: &str = "حول هذا المنتج";
pub const PRODUCT_ORDER: &str = "اطلب الآن 🛍️";
pub const PRODUCT_ORDER_RECEIVED: &str = "تم استلام طلبك! سنتواصل معك قريباً.";
pub const PRODUCT_DEFAULT_TAGLINE: &str = "منتج عالي الجودة من موروكي";
pub const PRODUCT_DEFAULT_DESCRIPTION: &str = "هذا المنتج متوفر في أسواق درب عمر بجودة عالية وسعر منافس.";
pub const PRODUCT_NOT_FOUND: &str = "المنتج غير موجود";
pub const PRODUCT_NOT_FOUND_BODY: &str = "لم نتمكن من العثور على المنتج المطلوب.";
pub const PRODUCT_MORE_INFO: &str = "معلومات إضافية";
pub const PRODUCT_IMAGE_COUNT: &str = "عدد الصور:";
pub const PRODUCT_ADDED_ON: &str = "تاريخ الإضافة:";
pub const PRODUCT_CONTACT: &str = "تواصل مع التاجر";

// Welcome
pub const WELCOME_TITLE: &str = "مرحباً بك في موروكي!";
pub const WELCOME_BODY: &str = "شكراً لانضمامك إلينا. الآن يمكنك إنشاء متجرك الخاص وبدء بيع منتجاتك.";
pub const WELCOME_NEXT: &str = "ما يجب عليك فعله الآن:";
pub const WELCOME_STEPS: [&str; 5] = [
    "اضغط على زر \"إنشاء متجر\" أدناه",
    "املأ معلومات متجرك (الاسم، الهاتف، الموقع)",
    "أضف منتجاتك الأولى",
    "انتظر موافقة الإدارة (سيتم إشعارك)",
    "ابدأ في بيع منتجاتك!",
];
pub const WELCOME_CREATE_STORE: &str = "إنشاء متجر جديد";
