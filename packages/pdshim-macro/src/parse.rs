use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    LitStr, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

mod kw {
    use syn::custom_keyword;

    custom_keyword!(symbol);
}

/// The symbol the host looks up to find the game's event handler.
pub const DEFAULT_SYMBOL: &str = "eventHandlerShim";

#[derive(Clone)]
pub struct MacroOpts {
    pub symbol: String,
}

impl Default for MacroOpts {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_owned(),
        }
    }
}

impl From<Attrs> for MacroOpts {
    fn from(value: Attrs) -> Self {
        let mut opts = Self::default();
        for attr in value.attr_list {
            match attr {
                Attribute::Symbol(symbol) => {
                    opts.symbol = symbol.value();
                }
            }
        }
        opts
    }
}

pub struct Attrs {
    attr_list: Punctuated<Attribute, Token![,]>,
}

impl Parse for Attrs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        Ok(Self {
            attr_list: Punctuated::parse_terminated(input)?,
        })
    }
}

pub enum Attribute {
    Symbol(Symbol),
}

impl Parse for Attribute {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let lookahead = input.lookahead1();
        if lookahead.peek(kw::symbol) {
            input.parse().map(Attribute::Symbol)
        } else {
            Err(lookahead.error())
        }
    }
}

impl ToTokens for Attribute {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Attribute::Symbol(symbol) => symbol.to_tokens(tokens),
        }
    }
}

pub struct Symbol {
    token: kw::symbol,
    eq: Token![=],
    name: LitStr,
}

impl Parse for Symbol {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let symbol = Self {
            token: input.parse()?,
            eq: input.parse()?,
            name: input.parse()?,
        };

        if symbol.name.value().is_empty() {
            return Err(syn::Error::new_spanned(
                &symbol.name,
                "The exported symbol name must not be empty.",
            ));
        }

        Ok(symbol)
    }
}

impl Symbol {
    pub fn value(&self) -> String {
        self.name.value()
    }
}

impl ToTokens for Symbol {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.token.to_tokens(tokens);
        self.eq.to_tokens(tokens);
        self.name.to_tokens(tokens);
    }
}
