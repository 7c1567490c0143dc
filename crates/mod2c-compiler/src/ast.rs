//! Typed abstract syntax tree.
//!
//! Every node carries a tag from a closed enumeration. Tags partition into
//! fixed-arity non-terminals (exact child count), list non-terminals (one
//! or more children of one role), and terminals (exactly one leaf value).
//! The legal child count per tag is given by [`NodeKind::arity`] and
//! enforced by the constructors; a violation is the distinguished
//! [`AstError::InvalidArity`]. Nodes are immutable after construction and
//! own their children, so releasing the root releases the whole tree.
//!
//! The downstream translator sees the tree only through the generic
//! accessor surface: `kind`, `child`, `children`, `len`, `value`, and
//! `NodeKind::name`.

use mod2c_core::{Pool, Symbol};

/// Node tags. Names follow the spellings used in diagnostics and AST
/// dumps (`NodeKind::name`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum NodeKind {
    // Fixed-arity non-terminals.
    Empty,
    File,
    Interface,
    Implementation,
    Program,
    Import,
    Reexp,
    Unq,
    Todo,
    Block,
    ConstDef,
    TypeDef,
    Alias,
    Subr,
    Enum,
    Set,
    Array,
    Record,
    Field,
    Pointer,
    Opaque,
    ProcType,
    ConstP,
    VarP,
    OpenArray,
    ArgList,
    CastAddr,
    CastOctSeq,
    FParams,
    ProcDecl,
    Proc,
    Bind,
    VarDecl,
    Assign,
    Copy,
    PCall,
    Return,
    New,
    NewInit,
    NewCap,
    Retain,
    Release,
    If,
    Elsif,
    Switch,
    Case,
    Loop,
    While,
    Repeat,
    For,
    Exit,
    Read,
    Write,
    Fmt,
    Nop,
    Eq,
    Neq,
    Idty,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Plus,
    Minus,
    Or,
    Concat,
    SetDiff,
    Asterisk,
    Solidus,
    Div,
    Mod,
    And,
    Not,
    Neg,
    TypeConv,
    Range,
    Desig,
    Deref,
    Select,
    Index,
    Slice,
    FCall,
    Expr,
    Struct,

    // List non-terminals (one or more children).
    ImpList,
    IdentList,
    Qualident,
    DefList,
    FieldSeq,
    FParamList,
    StmtSeq,
    ExprList,
    ElsifList,
    CaseList,
    SelList,
    TaskList,

    // Terminals (exactly one value).
    Ident,
    IntVal,
    RealVal,
    ChrVal,
    QuotedVal,
    Key,
    Filename,
}

/// Arity class of a tag.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Arity {
    Fixed(usize),
    List,
    Leaf,
}

impl NodeKind {
    /// The legal child count for this tag.
    pub fn arity(self) -> Arity {
        use Arity::*;
        use NodeKind::*;
        match self {
            Empty | Exit | Nop | CastAddr | CastOctSeq | Deref => Fixed(0),
            File | Import | Reexp | Unq | ConstP | VarP | OpenArray | ArgList | Bind | Set
            | Pointer | Opaque | Return | New | Retain | Release | Loop | Read | Write | Not
            | Neg | Select | Index | Slice | Expr | Struct | Alias => Fixed(1),
            Block | Todo | ConstDef | TypeDef | Enum | Array | Record | Field | ProcType | FParams
            | Proc | VarDecl | Assign | Copy | PCall | NewInit | NewCap | Elsif | Case | While
            | Repeat | Fmt | Eq | Neq | Idty | Lt | LtEq | Gt | GtEq | In | Plus | Minus | Or
            | Concat | SetDiff | Asterisk | Solidus | Div | Mod | And | TypeConv | Range
            | Desig | FCall => Fixed(2),
            Subr | Switch | For => Fixed(3),
            Interface | Implementation | Program | ProcDecl | If => Fixed(4),
            ImpList | IdentList | Qualident | DefList | FieldSeq | FParamList | StmtSeq
            | ExprList | ElsifList | CaseList | SelList | TaskList => List,
            Ident | IntVal | RealVal | ChrVal | QuotedVal | Key | Filename => Leaf,
        }
    }

    /// Stable spelling used by diagnostics and AST dumps.
    pub fn name(self) -> &'static str {
        use NodeKind::*;
        match self {
            Empty => "EMPTY",
            File => "FILE",
            Interface => "INTERFACE",
            Implementation => "IMPLEMENTATION",
            Program => "PROGRAM",
            Import => "IMPORT",
            Reexp => "REEXP",
            Unq => "UNQ",
            Todo => "TODO",
            Block => "BLOCK",
            ConstDef => "CONSTDEF",
            TypeDef => "TYPEDEF",
            Alias => "ALIAS",
            Subr => "SUBR",
            Enum => "ENUM",
            Set => "SET",
            Array => "ARRAY",
            Record => "RECORD",
            Field => "FIELD",
            Pointer => "POINTER",
            Opaque => "OPAQUE",
            ProcType => "PROCTYPE",
            ConstP => "CONSTP",
            VarP => "VARP",
            OpenArray => "OPENARRAY",
            ArgList => "ARGLIST",
            CastAddr => "CASTADDR",
            CastOctSeq => "CASTOCTSEQ",
            FParams => "FPARAMS",
            ProcDecl => "PROCDECL",
            Proc => "PROC",
            Bind => "BIND",
            VarDecl => "VARDECL",
            Assign => "ASSIGN",
            Copy => "COPY",
            PCall => "PCALL",
            Return => "RETURN",
            New => "NEW",
            NewInit => "NEWINIT",
            NewCap => "NEWCAP",
            Retain => "RETAIN",
            Release => "RELEASE",
            If => "IF",
            Elsif => "ELSIF",
            Switch => "SWITCH",
            Case => "CASE",
            Loop => "LOOP",
            While => "WHILE",
            Repeat => "REPEAT",
            For => "FOR",
            Exit => "EXIT",
            Read => "READ",
            Write => "WRITE",
            Fmt => "FMT",
            Nop => "NOP",
            Eq => "EQ",
            Neq => "NEQ",
            Idty => "IDTY",
            Lt => "LT",
            LtEq => "LTEQ",
            Gt => "GT",
            GtEq => "GTEQ",
            In => "IN",
            Plus => "PLUS",
            Minus => "MINUS",
            Or => "OR",
            Concat => "CONCAT",
            SetDiff => "SETDIFF",
            Asterisk => "ASTERISK",
            Solidus => "SOLIDUS",
            Div => "DIV",
            Mod => "MOD",
            And => "AND",
            Not => "NOT",
            Neg => "NEG",
            TypeConv => "TYPECONV",
            Range => "RANGE",
            Desig => "DESIG",
            Deref => "DEREF",
            Select => "SELECT",
            Index => "INDEX",
            Slice => "SLICE",
            FCall => "FCALL",
            Expr => "EXPR",
            Struct => "STRUCT",
            ImpList => "IMPLIST",
            IdentList => "IDENTLIST",
            Qualident => "QUALIDENT",
            DefList => "DEFLIST",
            FieldSeq => "FIELDSEQ",
            FParamList => "FPARAMLIST",
            StmtSeq => "STMTSEQ",
            ExprList => "EXPRLIST",
            ElsifList => "ELSIFLIST",
            CaseList => "CASELIST",
            SelList => "SELLIST",
            TaskList => "TASKLIST",
            Ident => "IDENT",
            IntVal => "INTVAL",
            RealVal => "REALVAL",
            ChrVal => "CHRVAL",
            QuotedVal => "QUOTEDVAL",
            Key => "KEY",
            Filename => "FILENAME",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Leaf payloads.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value {
    Ident(Symbol),
    Int { value: u64, lexeme: Symbol },
    Real(Symbol),
    Char(u32),
    Quoted(Symbol),
    Key(u32),
    Filename(Symbol),
}

impl Value {
    /// The terminal tag this payload belongs to.
    fn kind(&self) -> NodeKind {
        match self {
            Value::Ident(_) => NodeKind::Ident,
            Value::Int { .. } => NodeKind::IntVal,
            Value::Real(_) => NodeKind::RealVal,
            Value::Char(_) => NodeKind::ChrVal,
            Value::Quoted(_) => NodeKind::QuotedVal,
            Value::Key(_) => NodeKind::Key,
            Value::Filename(_) => NodeKind::Filename,
        }
    }
}

/// Construction failures. All deterministic; none observable from a
/// well-formed parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum AstError {
    #[error("invalid arity for {kind}: expected {expected}, got {given}")]
    InvalidArity {
        kind: NodeKind,
        expected: usize,
        given: usize,
    },
    #[error("list node {kind} requires at least one child")]
    EmptyList { kind: NodeKind },
    #[error("tag {kind} does not admit the given construction")]
    WrongClass { kind: NodeKind },
}

/// One AST node. Fixed-arity and list nodes are branches; terminals are
/// leaves carrying one value.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    Branch { kind: NodeKind, children: Vec<Node> },
    Leaf { kind: NodeKind, value: Value },
}

impl Node {
    /// Build a fixed-arity node; the child count must match the table.
    pub fn branch(kind: NodeKind, children: Vec<Node>) -> Result<Node, AstError> {
        match kind.arity() {
            Arity::Fixed(expected) => {
                if children.len() != expected {
                    return Err(AstError::InvalidArity {
                        kind,
                        expected,
                        given: children.len(),
                    });
                }
                Ok(Node::Branch { kind, children })
            }
            _ => Err(AstError::WrongClass { kind }),
        }
    }

    /// Build a list node; at least one child is required.
    pub fn list(kind: NodeKind, children: Vec<Node>) -> Result<Node, AstError> {
        match kind.arity() {
            Arity::List => {
                if children.is_empty() {
                    return Err(AstError::EmptyList { kind });
                }
                Ok(Node::Branch { kind, children })
            }
            _ => Err(AstError::WrongClass { kind }),
        }
    }

    /// Build a terminal node from its payload.
    pub fn leaf(value: Value) -> Node {
        Node::Leaf {
            kind: value.kind(),
            value,
        }
    }

    /// The `EMPTY` placeholder node.
    pub fn empty() -> Node {
        Node::Branch {
            kind: NodeKind::Empty,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Branch { kind, .. } | Node::Leaf { kind, .. } => *kind,
        }
    }

    pub fn is_empty_node(&self) -> bool {
        self.kind() == NodeKind::Empty
    }

    /// Child at `index`, if any.
    pub fn child(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Branch { children, .. } => children.get(index),
            Node::Leaf { .. } => None,
        }
    }

    /// All children (empty slice for leaves).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    /// Child count (list length for list nodes).
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The leaf payload, if this is a terminal node.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Branch { .. } => None,
        }
    }

    // --- dumps ----------------------------------------------------------

    /// Compact single-line S-expression (used by tests).
    pub fn to_sexpr(&self, pool: &Pool) -> String {
        let mut out = String::new();
        self.write_sexpr(pool, &mut out);
        out
    }

    fn write_sexpr(&self, pool: &Pool, out: &mut String) {
        match self {
            Node::Branch { kind, children } => {
                out.push('(');
                out.push_str(kind.name());
                for child in children {
                    out.push(' ');
                    child.write_sexpr(pool, out);
                }
                out.push(')');
            }
            Node::Leaf { kind, value } => {
                out.push('(');
                out.push_str(kind.name());
                out.push(' ');
                out.push_str(&render_value(value, pool));
                out.push(')');
            }
        }
    }

    /// Indented multi-line S-expression (the `--ast` product format).
    pub fn to_pretty_sexpr(&self, pool: &Pool) -> String {
        let mut out = String::new();
        self.write_pretty(pool, 0, &mut out);
        out.push('\n');
        out
    }

    fn write_pretty(&self, pool: &Pool, depth: usize, out: &mut String) {
        let pad = " ".repeat(depth * 2);
        match self {
            Node::Branch { kind, children } if children.iter().any(|c| !c.is_leaf()) => {
                out.push_str(&format!("{pad}({}", kind.name()));
                for child in children {
                    out.push('\n');
                    child.write_pretty(pool, depth + 1, out);
                }
                out.push(')');
            }
            _ => {
                out.push_str(&pad);
                self.write_sexpr(pool, out);
            }
        }
    }
}

fn render_value(value: &Value, pool: &Pool) -> String {
    let resolve = |sym: Symbol| pool.resolve(sym).unwrap_or_else(|| "?".to_owned());
    match value {
        Value::Ident(sym) | Value::Filename(sym) => resolve(*sym),
        Value::Int { value, .. } => format!("{value}"),
        Value::Real(sym) => resolve(*sym),
        Value::Char(code) => format!("0u{code:X}"),
        Value::Quoted(sym) => format!("\"{}\"", resolve(*sym)),
        Value::Key(key) => format!("0x{key:08X}"),
    }
}
