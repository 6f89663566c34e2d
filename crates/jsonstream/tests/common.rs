#![allow(missing_docs, dead_code)]

use std::borrow::Cow;

use jsonstream::{Readable, Reader, Result, TokenRead, TokenWrite, Writable, Writer};

/// A structured tool-call response, with a few fields the types below do not
/// know about.
pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main"
        },
        {
            "type": "macro",
            "name": "println"
        }
    ],
    "matrix": [
        [
            "a"
        ]
    ],
    "mixed": [
        "s",
        {
            "k": "v"
        },
        "t",
        [
            "u"
        ],
        "end"
    ],
    "trailing": {
        "status": "ok"
    }
}"#;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolCall<'a> {
    pub moderation: Moderation<'a>,
    pub request: Request<'a>,
    pub snippets: Vec<Cow<'a, str>>,
    pub entities: Vec<Entity<'a>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Moderation<'a> {
    pub decision: Cow<'a, str>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request<'a> {
    pub filename: Cow<'a, str>,
    pub language: Cow<'a, str>,
    pub opt_level: Option<i64>,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entity<'a> {
    pub kind: Cow<'a, str>,
    pub name: Cow<'a, str>,
}

impl<'a> Readable<'a> for ToolCall<'a> {
    fn read_from<T: TokenRead<'a>>(r: &mut Reader<'a, T>) -> Result<Self> {
        let mut call = ToolCall::default();
        let mut obj = r
            .object()?
            .with_required_properties(&["moderation", "request"]);
        while let Some((name, r)) = obj.next() {
            match name {
                "moderation" => call.moderation = Moderation::read_from(r)?,
                "request" => call.request = Request::read_from(r)?,
                "snippets" => call.snippets = Vec::read_from(r)?,
                "entities" => call.entities = Vec::read_from(r)?,
                _ => r.skip_value()?,
            }
        }
        Ok(call)
    }
}

impl<'a> Readable<'a> for Moderation<'a> {
    fn read_from<T: TokenRead<'a>>(r: &mut Reader<'a, T>) -> Result<Self> {
        let mut moderation = Moderation::default();
        let mut obj = r.object()?.with_required_properties(&["decision"]);
        while let Some((name, r)) = obj.next() {
            match name {
                "decision" => moderation.decision = r.string()?,
                "reason" => moderation.reason = r.string_or_null()?.map(Cow::into_owned),
                _ => r.skip_value()?,
            }
        }
        Ok(moderation)
    }
}

impl<'a> Readable<'a> for Request<'a> {
    fn read_from<T: TokenRead<'a>>(r: &mut Reader<'a, T>) -> Result<Self> {
        let mut request = Request::default();
        let mut obj = r.object()?;
        while let Some((name, r)) = obj.next() {
            match name {
                "filename" => request.filename = r.string()?,
                "language" => request.language = r.string()?,
                "options" => {
                    let Some(mut options) = r.object_or_null()? else {
                        continue;
                    };
                    while let Some((name, r)) = options.next() {
                        match name {
                            "opt_level" => request.opt_level = r.int_or_null()?,
                            "features" => request.features = Vec::read_from(r)?,
                            _ => r.skip_value()?,
                        }
                    }
                }
                _ => r.skip_value()?,
            }
        }
        Ok(request)
    }
}

impl<'a> Readable<'a> for Entity<'a> {
    fn read_from<T: TokenRead<'a>>(r: &mut Reader<'a, T>) -> Result<Self> {
        let mut entity = Entity::default();
        let mut obj = r.object()?.with_required_properties(&["type", "name"]);
        while let Some((name, r)) = obj.next() {
            match name {
                "type" => entity.kind = r.string()?,
                "name" => entity.name = r.string()?,
                _ => r.skip_value()?,
            }
        }
        Ok(entity)
    }
}

impl Writable for ToolCall<'_> {
    fn write_to<T: TokenWrite>(&self, w: &mut Writer<T>) {
        let mut obj = w.object();
        self.moderation.write_to(obj.property("moderation"));
        self.request.write_to(obj.property("request"));
        self.snippets.write_to(obj.property("snippets"));
        self.entities.write_to(obj.property("entities"));
        obj.end();
    }
}

impl Writable for Moderation<'_> {
    fn write_to<T: TokenWrite>(&self, w: &mut Writer<T>) {
        let mut obj = w.object();
        obj.string("decision", &self.decision);
        obj.property("reason").string_or_null(self.reason.as_deref());
        obj.end();
    }
}

impl Writable for Request<'_> {
    fn write_to<T: TokenWrite>(&self, w: &mut Writer<T>) {
        let mut obj = w.object();
        obj.string("filename", &self.filename);
        obj.string("language", &self.language);
        let mut options = obj.object("options");
        options.opt_int("opt_level", self.opt_level);
        self.features.write_to(options.property("features"));
        options.end();
        obj.end();
    }
}

impl Writable for Entity<'_> {
    fn write_to<T: TokenWrite>(&self, w: &mut Writer<T>) {
        let mut obj = w.object();
        obj.string("type", &self.kind);
        obj.string("name", &self.name);
        obj.end();
    }
}

pub fn expected() -> ToolCall<'static> {
    ToolCall {
        moderation: Moderation {
            decision: "allow".into(),
            reason: None,
        },
        request: Request {
            filename: "example.rs".into(),
            language: "rust".into(),
            opt_level: Some(2),
            features: vec!["serde".into(), "tokio".into()],
        },
        snippets: vec!["fn main() {}".into(), "println!(\"hi\")".into()],
        entities: vec![
            Entity {
                kind: "function".into(),
                name: "main".into(),
            },
            Entity {
                kind: "macro".into(),
                name: "println".into(),
            },
        ],
    }
}
