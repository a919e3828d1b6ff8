//! The whole book as one HTML document (`allOfBook.html`), the input for
//! the printable PDF edition.
//!
//! Every part is converted with [`crate::rst`] and concatenated in path
//! order after a fixed preface. The first part that uses markup the
//! converter does not know stops the build.

use crate::config::SiteInfo;
use crate::layout::MATHJAX_URL;
use crate::rst::{self, RstError};
use crate::types::BookPart;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = "img { display: block; text-align: center; max-width: 100%; }";

/// Enables `$…$` and `\(…\)` as inline math delimiters.
const MATHJAX_CONFIG: &str = r"window.MathJax = {
  tex: {
    inlineMath: [['$', '$'], ['\\(', '\\)']]
  }
};";

fn preface(site: &SiteInfo) -> Markup {
    html! {
        p {
            "این نسخه پی دی اف، صرفا برای وجود شکل سنتی کتاب ساخته شده است و اکیدا توصیه "
            "می شود که به جای آن، از نسخه آنلاین استفاده کنید. مزایای استفاده از "
            "نسخه آنلاین کتاب عبارت اند از "
            "تصاویر رنگی، ظاهر زیبا، پیوند های درون کتاب و فهرست پیوند شده، نگه دارنده سوال "
            "حل شده، همواره به روز بودن آن و ... نسخه آنلاین کتاب را می توانید از "
            (site.url)
            " مطالعه کنید. این کتاب شامل صد ها صفحه است، پس حتی المقدور سعی کنید آن را چاپ "
            "نکنید تا به محیط زیست احترام بگذارید و منابع محدود زمین را برای آیندگان باقی "
            "بگذارید."
        }
        p {
            "حق تکثیر این کتاب، برای شاززز محفوظ است. شما می توانید با شرایط مجوز "
            "کریتیو کامانز تخصیص - اشتراک همسان نسخه چهار بین الملل "
            "از این کتاب استفاده کنید. این به این معنی است که شما می توانید آزادانه "
            "این کتاب را مطالعه، تکثیر و تغییر دهید به شرط این که "
            "به نویسندگان و به این مجوز اشاره کنید و هر اثر مشتق شده از این کتاب را "
            "نیز با همین مجوز منتشر کنید، یعنی به دیگران اجازه دهید تا آن را تکثیر و تغییر "
            "دهند. برای جزییات بیشتر و متن حقوقی این مجوز، وبسایت کریتیو کامانز را ببینید."
        }
    }
}

/// Convert every part, in the order given.
pub fn convert_parts(parts: &[BookPart]) -> Result<Vec<String>, RstError> {
    parts
        .iter()
        .map(|part| rst::to_html(&part.text, &part.rel_path))
        .collect()
}

/// Render the combined book.
pub fn render(parts: &[BookPart], site: &SiteInfo) -> Result<String, RstError> {
    let chapters = convert_parts(parts)?.concat();
    let doc = html! {
        (DOCTYPE)
        html lang="fa" {
            head {
                meta charset="UTF-8";
                title { (site.title) }
                style { (PreEscaped(STYLE)) }
                script { (PreEscaped(MATHJAX_CONFIG)) }
                script async src=(MATHJAX_URL) {}
            }
            body dir="rtl" {
                h1 { (site.title) }
                (preface(site))
                (PreEscaped(chapters))
            }
        }
    };
    Ok(doc.into_string())
}
