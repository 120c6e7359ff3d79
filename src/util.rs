use crate::{param::STATUS_CODES, variant::Variant};

pub struct HtmlBuilder {
    title: String,
    css: String,
    body: String,
}

/// 转义 HTML 特殊字符，媒体参数取值可能来自外部输入。
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl HtmlBuilder {
    /// 未登记的状态码使用通用描述，而不是让调用方崩溃。
    pub fn from_status_code(code: u16) -> Self {
        let title = format!("{}", code);
        let css = r"
            body {
                width: 35em;
                margin: 0 auto;
                font-family: Tahoma, Verdana, Arial, sans-serif;
            }
            "
        .to_string();
        let description = STATUS_CODES.get(&code).copied().unwrap_or("Unknown Status");
        let body = format!(
            r"
            <h1>{}</h1>
            <p>{}</p>
            ",
            code, description
        );
        Self { title, css, body }
    }

    /// 406 页面：列出资源实际可以提供的变体，方便客户端调整偏好。
    pub fn from_variants(code: u16, variants: &[Variant]) -> Self {
        let mut builder = Self::from_status_code(code);
        builder.body.push_str("<p>可用的变体：</p><table>");
        builder.body.push_str(
            r#"
            <tr>
                <td>媒体类型</td>
                <td>语言</td>
            </tr>
            "#,
        );
        for variant in variants {
            let language = variant
                .language()
                .map(|l| l.to_string())
                .unwrap_or_default();
            builder.body.push_str(&format!(
                r#"
                <tr>
                    <td>{}</td>
                    <td>{}</td>
                </tr>
                "#,
                escape_html(&variant.media_type().to_string()),
                escape_html(&language)
            ));
        }
        builder.body.push_str("</table>");
        builder.css.push_str(
            r"
            td {
                padding: 8px;
                border: none; /* 隐藏单元格边框 */
            }",
        );
        builder
    }

    pub fn build(&self) -> String {
        format!(
            r##"<!DOCTYPE html>
            <!-- 本文件由shaneyale的conneg自动生成 -->
            <html>
                <head>
                    <meta charset="utf-8">
                    <title>{}</title>
                    <style>{}</style>
                </head>
                <body>
                {}
                </body>
            </html>"##,
            self.title, self.css, self.body
        )
    }
}
